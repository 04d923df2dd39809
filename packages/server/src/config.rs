//! Server configuration (command-line arguments).

use clap::Parser;

use crate::domain::Locale;

/// Socket.IO room lifecycle server for Maru
#[derive(Debug, Clone, Parser)]
#[command(name = "maru-server", version, about)]
pub struct ServerConfig {
    /// Host address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Origin of the REST API owning the room records.
    /// Without it sessions are not looked up and room deletions go to
    /// `http://localhost:{port}`.
    #[arg(long)]
    pub api_origin: Option<String>,

    /// Path of the REST API's session lookup endpoint
    #[arg(long, default_value = "/api/user")]
    pub session_path: String,

    /// Query parameter of the referer carrying the room id
    #[arg(long, default_value = "id")]
    pub room_param: String,

    /// Language of the join/exit notices (ko, en)
    #[arg(long, default_value = "ko")]
    pub locale: Locale,

    /// Skip session lookup and treat every socket as anonymous
    #[arg(long)]
    pub anonymous: bool,
}

impl ServerConfig {
    /// API origin, falling back to this server's own origin on `port`.
    pub fn api_origin_for(&self, port: u16) -> String {
        self.api_origin
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{port}"))
    }

    /// Whether handshakes are resolved against the REST API's session
    /// endpoint. This server does not serve that endpoint itself, so a lookup
    /// needs an explicit `--api-origin`.
    pub fn resolves_sessions(&self) -> bool {
        !self.anonymous && self.api_origin.is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_origin: None,
            session_path: "/api/user".to_string(),
            room_param: "id".to_string(),
            locale: Locale::Ko,
            anonymous: false,
        }
    }
}
