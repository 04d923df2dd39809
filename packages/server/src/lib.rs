//! Maru chat server library.
//!
//! A namespaced Socket.IO server that tracks room membership on the `/chat`
//! namespace, relays chat payloads between room members and asks the REST
//! API to delete a room once its last occupant leaves.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{build_app, run, serve};
