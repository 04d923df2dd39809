//! Infrastructure layer: adapters for the socket library and the REST API.

pub mod dto;
pub mod membership;
pub mod notifier;
pub mod session;

pub use membership::{InMemoryMembership, InMemoryRoomHub, OutboundEvent, SocketIoMembership};
pub use notifier::HttpRoomDeletionNotifier;
pub use session::{AnonymousSessionResolver, HttpSessionResolver};
