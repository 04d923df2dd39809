//! Server startup and namespace registration.

use std::sync::Arc;

use axum::{Router, routing::get};
use socketioxide::{
    SocketIo,
    extract::{MaybeExtension, SocketRef},
    handler::ConnectHandler,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{handler, signal::shutdown_signal, state::AppState};
use crate::{config::ServerConfig, domain::UserIdentity, error::ServerError};

/// Bind the configured address and serve until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    serve(listener, config).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> Result<(), ServerError> {
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    let state = Arc::new(AppState::from_config(&config, local_addr.port()));
    let app = build_app(state);

    tracing::info!("Socket.IO server listening on http://{}", local_addr);
    tracing::info!(
        "Room deletions go to {}",
        config.api_origin_for(local_addr.port())
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

/// Build the HTTP router with the Socket.IO layer mounted on `/socket.io`.
pub fn build_app(state: Arc<AppState>) -> Router {
    let (layer, io) = SocketIo::new_layer();
    register_namespaces(&io, state);

    Router::new()
        .route("/api/health", get(handler::health_check))
        .layer(layer)
        .layer(TraceLayer::new_for_http())
}

fn register_namespaces(io: &SocketIo, state: Arc<AppState>) {
    let authenticate = {
        let state = Arc::clone(&state);
        move |socket: SocketRef| {
            let state = Arc::clone(&state);
            async move { handler::middleware::authenticate(socket, state).await }
        }
    };

    io.ns(
        "/room",
        handler::room::on_connect.with(authenticate.clone()),
    );

    let on_chat_connect =
        move |socket: SocketRef, MaybeExtension(identity): MaybeExtension<UserIdentity>| {
            handler::chat::on_connect(socket, identity, Arc::clone(&state));
        };
    io.ns("/chat", on_chat_connect.with(authenticate));
}
