//! Implementations of the room registry port.

pub mod inmemory;
pub mod socketio;

pub use inmemory::{InMemoryMembership, InMemoryRoomHub, OutboundEvent};
pub use socketio::SocketIoMembership;
