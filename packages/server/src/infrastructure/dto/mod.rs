//! Data transfer objects.

pub mod http;
pub mod websocket;
