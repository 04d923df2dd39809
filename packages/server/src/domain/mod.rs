//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! the socket library and the HTTP collaborators.

pub mod entity;
pub mod error;
pub mod port;
pub mod value_object;

pub use entity::{CHAT_TARGET_FIELD, ChatPayload, SYSTEM_SENDER, SystemNotice, UserIdentity};
pub use error::{MembershipError, NotifyError, SessionError, ValueObjectError};
pub use port::{RoomDeletionNotifier, RoomMembership, SessionResolver};
#[cfg(test)]
pub use port::{MockRoomDeletionNotifier, MockSessionResolver};
pub use value_object::{Locale, Nickname, RoomAssignment, RoomId, UNDEFINED_CHANNEL};
