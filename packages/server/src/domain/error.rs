//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    /// Nickname validation error
    #[error("Nickname cannot be empty")]
    NicknameEmpty,

    #[error("Unknown locale: {0} (expected ko or en)")]
    UnknownLocale(String),
}

/// Errors raised by the room registry of the socket library
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The registry rejected a join/leave or could not be queried
    #[error("Room registry error: {0}")]
    Registry(String),

    /// An emit to a room channel failed
    #[error("Broadcast to room '{room}' failed: {reason}")]
    Broadcast { room: String, reason: String },
}

/// Errors raised while requesting room deletion from the REST API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Deletion request failed: {0}")]
    Transport(String),

    #[error("Deletion request for room '{room}' was rejected with status {status}")]
    Status { room: String, status: u16 },
}

/// Errors raised while resolving the handshake session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session lookup failed: {0}")]
    Transport(String),

    #[error("Session lookup was rejected with status {0}")]
    Status(u16),

    #[error("Session payload is invalid: {0}")]
    InvalidPayload(#[from] ValueObjectError),
}
