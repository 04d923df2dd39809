//! Handler modules for HTTP endpoints and Socket.IO namespaces.

pub mod chat;
pub mod http;
pub mod middleware;
pub mod room;

// Re-export HTTP handlers
pub use http::health_check;
