//! `/chat` namespace: room join, chat relay and room teardown.

use std::sync::Arc;

use axum::http::header::REFERER;
use socketioxide::{
    extract::{Data, SocketRef},
    socket::DisconnectReason,
};

use super::middleware::header_value;
use crate::{
    domain::{ChatPayload, RoomAssignment, UserIdentity},
    infrastructure::{SocketIoMembership, dto::websocket::SocketEvent},
    ui::state::AppState,
    usecase::LeaveOutcome,
};

pub fn on_connect(socket: SocketRef, identity: Option<UserIdentity>, state: Arc<AppState>) {
    tracing::info!("Socket '{}' connected to /chat", socket.id);

    let referer = header_value(socket.req_parts(), REFERER);
    let room = RoomAssignment::from_referer(referer.as_deref(), &state.room_param);
    tracing::debug!("Socket '{}' referer {:?} -> room '{}'", socket.id, referer, room);

    let membership = SocketIoMembership::from(socket.clone());
    if let Err(e) = state.join.execute(&membership, &room, identity.as_ref()) {
        tracing::error!("Socket '{}' failed to join room '{}': {}", socket.id, room, e);
    }

    socket.on(SocketEvent::Chat.as_str(), {
        let state = Arc::clone(&state);
        move |socket: SocketRef, Data(payload): Data<serde_json::Value>| {
            let membership = SocketIoMembership::from(socket);
            if let Err(e) = state.relay.execute(&membership, &ChatPayload::new(payload)) {
                tracing::error!("Chat relay failed: {}", e);
            }
        }
    });

    socket.on_disconnect(move |socket: SocketRef, reason: DisconnectReason| {
        tracing::info!("Socket '{}' disconnected from /chat ({:?})", socket.id, reason);

        let membership = SocketIoMembership::from(socket);
        match state.leave.execute(&membership, &room, identity.as_ref()) {
            Ok(LeaveOutcome::PeersNotified { remaining }) => {
                tracing::debug!("Room '{}' keeps {} member(s)", room, remaining);
            }
            // The deletion task is detached; its result is only logged.
            Ok(LeaveOutcome::RoomEmptied { .. }) => {}
            Err(e) => {
                tracing::error!("Failed to leave room '{}': {}", room, e);
            }
        }
    });
}
