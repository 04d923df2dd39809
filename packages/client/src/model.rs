//! Data exchanged with the REST backend.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Persisted room metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomData {
    pub id: i64,
    pub title: String,
    pub max: u32,
    #[serde(default)]
    pub owner: Option<String>,
}

/// A chat line as stored by the backend or received over the socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatData {
    #[serde(default, rename = "RoomId")]
    pub room_id: Option<i64>,
    pub user: String,
    pub chat: String,
    #[serde(default)]
    pub gif: Option<String>,
    /// Creation time recorded by the backend (RFC 3339); absent on socket
    /// events
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A chat line held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub data: ChatData,
    /// Backend creation time for loaded history; receive time for socket
    /// events
    pub created_at: DateTime<FixedOffset>,
}

/// Body of `GET /api/chat/room/{id}/{password}`
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDetail {
    pub room: RoomData,
    #[serde(default)]
    pub chats: Vec<ChatData>,
}

/// Body of `POST /api/chat/room`
#[derive(Debug, Clone, Serialize)]
pub struct NewRoom {
    pub title: String,
    pub max: u32,
    pub password: String,
}

/// Body of `POST /api/chat/room/check`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCheckRequest {
    pub password: String,
    pub room_id: i64,
}

/// Body of `POST /api/chat/{roomId}`
#[derive(Debug, Clone, Serialize)]
pub struct NewChat {
    pub chat: String,
}
