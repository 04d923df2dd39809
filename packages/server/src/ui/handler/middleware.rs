//! Handshake middleware attaching the session's user to the socket.

use std::sync::Arc;

use axum::http::{HeaderName, header::COOKIE, request::Parts};
use socketioxide::extract::SocketRef;

use crate::{domain::SessionError, ui::state::AppState};

/// Resolve the handshake's session and store the user in the socket extensions.
///
/// An anonymous handshake proceeds; a failed lookup rejects the connection.
pub async fn authenticate(socket: SocketRef, state: Arc<AppState>) -> Result<(), SessionError> {
    let cookie = header_value(socket.req_parts(), COOKIE);

    match state.authenticate.execute(cookie).await {
        Ok(Some(identity)) => {
            socket.extensions.insert(identity);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::warn!("Rejecting socket '{}': {}", socket.id, e);
            Err(e)
        }
    }
}

/// First value of `name` in the handshake request, if it is valid UTF-8.
pub fn header_value(parts: &Parts, name: HeaderName) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
