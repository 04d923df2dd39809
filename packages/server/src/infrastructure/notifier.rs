//! HTTP implementation of the room deletion port.

use async_trait::async_trait;

use crate::domain::{NotifyError, RoomAssignment, RoomDeletionNotifier};

/// Sends `DELETE {origin}/room/{roomId}` to the REST API
#[derive(Clone)]
pub struct HttpRoomDeletionNotifier {
    client: reqwest::Client,
    origin: String,
}

impl HttpRoomDeletionNotifier {
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), origin)
    }

    pub fn with_client(client: reqwest::Client, origin: impl Into<String>) -> Self {
        Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint targeted for `room`.
    pub fn deletion_url(&self, room: &RoomAssignment) -> String {
        format!("{}/room/{}", self.origin, room.channel())
    }
}

#[async_trait]
impl RoomDeletionNotifier for HttpRoomDeletionNotifier {
    async fn request_deletion(&self, room: RoomAssignment) -> Result<(), NotifyError> {
        let response = self
            .client
            .delete(self.deletion_url(&room))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                room: room.channel().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
