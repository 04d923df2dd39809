//! Ports the domain depends on.
//!
//! The socket library owns the room registry and the REST API owns the room
//! records. Both are reached through these traits so the use cases never
//! touch global state directly; the UI layer hands in a per-socket handle.

use async_trait::async_trait;

use super::{
    entity::UserIdentity,
    error::{MembershipError, NotifyError, SessionError},
    value_object::RoomAssignment,
};

/// Per-socket handle onto the socket library's room registry.
///
/// Every method acts on behalf of one connected socket. Occupancy is always
/// read live from the registry and never cached.
pub trait RoomMembership: Send + Sync {
    /// Identifier of the socket this handle belongs to.
    fn socket_id(&self) -> String;

    fn join(&self, room: &RoomAssignment) -> Result<(), MembershipError>;

    fn leave(&self, room: &RoomAssignment) -> Result<(), MembershipError>;

    /// Number of sockets currently joined to `room`.
    fn occupancy(&self, room: &RoomAssignment) -> Result<usize, MembershipError>;

    /// Emit `event` to every socket in `room` except this one.
    fn broadcast(
        &self,
        room: &RoomAssignment,
        event: &str,
        payload: &serde_json::Value,
    ) -> Result<(), MembershipError>;
}

/// Requests deletion of an emptied room from the REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDeletionNotifier: Send + Sync {
    async fn request_deletion(&self, room: RoomAssignment) -> Result<(), NotifyError>;
}

/// Resolves the user behind a handshake's cookies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` means the handshake carries no authenticated session.
    async fn resolve(&self, cookie: Option<String>) -> Result<Option<UserIdentity>, SessionError>;
}
