//! Maru chat client library.
//!
//! [`ChatStore`] keeps the room and chat state of one user in sync with the
//! REST backend and with socket events ([`socket`]). The CLI in [`repl`] is
//! one consumer of the store; any UI can subscribe to its state snapshots.

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod model;
pub mod repl;
pub mod socket;
pub mod store;

// Re-export entry points
pub use api::{ChatApi, HttpChatApi};
pub use error::{SocketError, StoreError};
pub use repl::run_client;
pub use socket::{LiveSocket, StoreEvent};
pub use store::{ChatState, ChatStore, PasswordCheck};
