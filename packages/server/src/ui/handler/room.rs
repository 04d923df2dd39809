//! `/room` namespace: connection lifecycle logging only.

use socketioxide::extract::SocketRef;

pub fn on_connect(socket: SocketRef) {
    tracing::info!("Socket '{}' connected to /room", socket.id);

    socket.on_disconnect(|socket: SocketRef| {
        tracing::info!("Socket '{}' disconnected from /room", socket.id);
    });
}
