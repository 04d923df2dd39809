//! Room registry backed by socketioxide's local adapter.

use socketioxide::extract::SocketRef;

use crate::domain::{MembershipError, RoomAssignment, RoomMembership};

/// [`RoomMembership`] over a live Socket.IO socket
#[derive(Clone)]
pub struct SocketIoMembership {
    socket: SocketRef,
}

impl SocketIoMembership {
    pub fn new(socket: SocketRef) -> Self {
        Self { socket }
    }
}

impl From<SocketRef> for SocketIoMembership {
    fn from(socket: SocketRef) -> Self {
        Self::new(socket)
    }
}

impl RoomMembership for SocketIoMembership {
    fn socket_id(&self) -> String {
        self.socket.id.to_string()
    }

    fn join(&self, room: &RoomAssignment) -> Result<(), MembershipError> {
        self.socket
            .join(room.channel().to_string())
            .map_err(|e| MembershipError::Registry(e.to_string()))
    }

    fn leave(&self, room: &RoomAssignment) -> Result<(), MembershipError> {
        self.socket
            .leave(room.channel().to_string())
            .map_err(|e| MembershipError::Registry(e.to_string()))
    }

    fn occupancy(&self, room: &RoomAssignment) -> Result<usize, MembershipError> {
        self.socket
            .within(room.channel().to_string())
            .sockets()
            .map(|sockets| sockets.len())
            .map_err(|e| MembershipError::Registry(e.to_string()))
    }

    fn broadcast(
        &self,
        room: &RoomAssignment,
        event: &str,
        payload: &serde_json::Value,
    ) -> Result<(), MembershipError> {
        self.socket
            .to(room.channel().to_string())
            .emit(event.to_string(), payload)
            .map_err(|e| MembershipError::Broadcast {
                room: room.channel().to_string(),
                reason: e.to_string(),
            })
    }
}
