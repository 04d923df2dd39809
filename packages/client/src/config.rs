//! Client configuration (command-line arguments).

use clap::Parser;

/// CLI chat client for Maru
#[derive(Debug, Clone, Parser)]
#[command(name = "maru-client", version, about)]
pub struct ClientConfig {
    /// Base URL of the REST backend
    #[arg(short, long, default_value = "http://localhost:8080")]
    pub backend_url: String,

    /// Base URL of the Socket.IO server. Defaults to the backend URL.
    #[arg(short, long)]
    pub socket_url: Option<String>,

    /// Referer query parameter the socket server reads the room id from
    #[arg(long, default_value = "id")]
    pub room_param: String,

    /// Name shown on the chat lines sent over the socket
    #[arg(short, long, default_value = "guest")]
    pub nickname: String,
}

impl ClientConfig {
    pub fn socket_url(&self) -> &str {
        self.socket_url.as_deref().unwrap_or(&self.backend_url)
    }
}
