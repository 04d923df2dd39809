//! Client error definitions.

use thiserror::Error;

/// Failure of a store request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `410 Gone`
    #[error("The room no longer exists")]
    RoomGone,

    /// `403 Forbidden`
    #[error("Wrong room password")]
    WrongPassword,

    /// Any other non-success status
    #[error("Server error (status {0})")]
    Server(u16),

    /// The request never got a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// A room-scoped action was attempted before any room was loaded
    #[error("No room is loaded")]
    NoRoom,
}

impl StoreError {
    /// Map a non-success HTTP status to its client meaning.
    pub fn from_status(status: u16) -> Self {
        match status {
            410 => Self::RoomGone,
            403 => Self::WrongPassword,
            other => Self::Server(other),
        }
    }
}

/// Failure of a Socket.IO subscription
#[derive(Debug, Error)]
#[error("Socket on {namespace} failed: {reason}")]
pub struct SocketError {
    pub namespace: &'static str,
    pub reason: String,
}

impl SocketError {
    pub fn new(namespace: &'static str, reason: impl std::fmt::Display) -> Self {
        Self {
            namespace,
            reason: reason.to_string(),
        }
    }
}

/// Failure to start the CLI
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Failed to start line editor: {0}")]
    Editor(String),
}
