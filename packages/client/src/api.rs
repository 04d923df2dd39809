//! REST backend access used by the store.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    IntoUrl, Url,
    cookie::{CookieStore, Jar},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::StoreError,
    model::{NewChat, NewRoom, PasswordCheckRequest, RoomData, RoomDetail},
};

/// REST endpoints consumed by [`crate::ChatStore`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /api/chat/room/check`
    async fn check_password(&self, password: String, room_id: i64) -> Result<(), StoreError>;

    /// `GET /api/chat/room/{id}/{password}`
    async fn fetch_room(&self, room_id: i64, password: String) -> Result<RoomDetail, StoreError>;

    /// `GET /api/chat/room/all`
    async fn fetch_rooms(&self) -> Result<Vec<RoomData>, StoreError>;

    /// `POST /api/chat/room`
    async fn create_room(&self, room: NewRoom) -> Result<RoomData, StoreError>;

    /// `POST /api/chat/{roomId}`
    async fn post_chat(&self, room_id: i64, message: String) -> Result<(), StoreError>;
}

/// [`ChatApi`] over HTTP
///
/// The client keeps a cookie jar so the session survives between calls,
/// like a browser sending credentials. The same jar supplies the `Cookie`
/// header of the socket handshake.
#[derive(Clone)]
pub struct HttpChatApi {
    client: reqwest::Client,
    cookies: Arc<Jar>,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_cookies(Arc::new(Jar::default()), base_url)
    }

    /// Share `cookies` with other clients, e.g. one that already logged in.
    pub fn with_cookies(
        cookies: Arc<Jar>,
        base_url: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()?;
        Ok(Self {
            client,
            cookies,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `Cookie` header value the jar holds for `url`.
    pub fn cookie_header(&self, url: &str) -> Option<String> {
        let url = Url::parse(url).ok()?;
        self.cookies
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Request to {} failed with {}", response.url(), status);
            return Err(StoreError::from_status(status.as_u16()));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: impl IntoUrl) -> Result<T, StoreError> {
        let response = self.send(self.client.get(url)).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, StoreError> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn check_password(&self, password: String, room_id: i64) -> Result<(), StoreError> {
        let body = PasswordCheckRequest { password, room_id };
        self.post("/api/chat/room/check", &body).await?;
        Ok(())
    }

    async fn fetch_room(&self, room_id: i64, password: String) -> Result<RoomDetail, StoreError> {
        // The password is one path segment whatever characters it holds.
        let mut url = Url::parse(&self.url("/api/chat/room"))
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| StoreError::Transport(format!("{} cannot carry a path", self.base_url)))?
            .push(&room_id.to_string())
            .push(&password);
        self.get_json(url).await
    }

    async fn fetch_rooms(&self) -> Result<Vec<RoomData>, StoreError> {
        self.get_json(self.url("/api/chat/room/all")).await
    }

    async fn create_room(&self, room: NewRoom) -> Result<RoomData, StoreError> {
        let response = self.post("/api/chat/room", &room).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn post_chat(&self, room_id: i64, message: String) -> Result<(), StoreError> {
        let body = NewChat { chat: message };
        self.post(&format!("/api/chat/{room_id}"), &body).await?;
        Ok(())
    }
}
