//! Shared application state.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::SessionResolver,
    infrastructure::{AnonymousSessionResolver, HttpRoomDeletionNotifier, HttpSessionResolver},
    usecase::{AuthenticateUseCase, JoinRoomUseCase, LeaveRoomUseCase, RelayChatUseCase},
};

/// Use cases shared by every socket of both namespaces
pub struct AppState {
    pub authenticate: AuthenticateUseCase,
    pub join: JoinRoomUseCase,
    pub leave: LeaveRoomUseCase,
    pub relay: RelayChatUseCase,
    /// Referer query parameter carrying the room id
    pub room_param: String,
}

impl AppState {
    /// Wire the HTTP collaborators described by `config`.
    ///
    /// `port` is the port actually bound, used when no API origin is configured.
    pub fn from_config(config: &ServerConfig, port: u16) -> Self {
        let origin = config.api_origin_for(port);

        let resolver: Arc<dyn SessionResolver> = if config.resolves_sessions() {
            Arc::new(HttpSessionResolver::new(&origin, &config.session_path))
        } else {
            if !config.anonymous {
                tracing::warn!("No --api-origin given; every socket connects anonymously");
            }
            Arc::new(AnonymousSessionResolver)
        };
        let notifier = Arc::new(HttpRoomDeletionNotifier::new(origin));

        Self {
            authenticate: AuthenticateUseCase::new(resolver),
            join: JoinRoomUseCase::new(config.locale),
            leave: LeaveRoomUseCase::new(config.locale, notifier),
            relay: RelayChatUseCase::new(),
            room_param: config.room_param.clone(),
        }
    }
}
