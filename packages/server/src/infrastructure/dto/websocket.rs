//! Socket.IO event DTOs for the chat namespace.

/// Events emitted on the `/chat` namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketEvent {
    /// A member joined the room (server → room)
    Join,
    /// A member left the room (server → room)
    Exit,
    /// A chat payload relayed between members (client → server → room)
    Chat,
}

impl SocketEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Exit => "exit",
            Self::Chat => "chat",
        }
    }
}
