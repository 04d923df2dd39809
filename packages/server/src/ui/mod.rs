//! Socket.IO server: namespace handlers and HTTP router.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_app, run, serve};
