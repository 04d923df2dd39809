//! Implementations of the session resolution port.

use async_trait::async_trait;
use reqwest::{StatusCode, header::COOKIE};

use crate::{
    domain::{Nickname, SessionError, SessionResolver, UserIdentity},
    infrastructure::dto::http::SessionUserDto,
};

/// Forwards the handshake cookie to the REST API's session endpoint
#[derive(Clone)]
pub struct HttpSessionResolver {
    client: reqwest::Client,
    url: String,
}

impl HttpSessionResolver {
    pub fn new(origin: &str, session_path: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!(
                "{}/{}",
                origin.trim_end_matches('/'),
                session_path.trim_start_matches('/')
            ),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SessionResolver for HttpSessionResolver {
    async fn resolve(&self, cookie: Option<String>) -> Result<Option<UserIdentity>, SessionError> {
        let Some(cookie) = cookie else {
            return Ok(None);
        };

        let response = self
            .client
            .get(&self.url)
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => return Err(SessionError::Status(status.as_u16())),
            _ => {}
        }

        let body: SessionUserDto = response
            .json()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        match body.nickname {
            Some(name) => Ok(Some(UserIdentity::new(Nickname::new(name)?))),
            None => Ok(None),
        }
    }
}

/// Treats every handshake as anonymous
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousSessionResolver;

#[async_trait]
impl SessionResolver for AnonymousSessionResolver {
    async fn resolve(&self, _cookie: Option<String>) -> Result<Option<UserIdentity>, SessionError> {
        Ok(None)
    }
}
