//! Core domain models for the chat namespace.

use serde::{Deserialize, Serialize};

use super::value_object::{Locale, Nickname, RoomAssignment};

/// Sender tag carried by every server-generated notice.
pub const SYSTEM_SENDER: &str = "system";

/// Field of a chat payload naming the target room.
pub const CHAT_TARGET_FIELD: &str = "RoomId";

/// The authenticated user attached to a socket during the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub nickname: Nickname,
}

impl UserIdentity {
    pub fn new(nickname: Nickname) -> Self {
        Self { nickname }
    }
}

/// Arrival or departure notice broadcast to the peers of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotice {
    /// Always [`SYSTEM_SENDER`]
    pub user: String,
    /// Localized message text
    pub chat: String,
}

impl SystemNotice {
    /// Notice sent to the room when `user` joins it.
    pub fn arrival(locale: Locale, user: Option<&UserIdentity>) -> Self {
        let name = display_name(locale, user);
        let chat = match locale {
            Locale::Ko => format!("{name}님이 입장하셨습니다."),
            Locale::En => format!("{name} joined the room."),
        };
        Self::system(chat)
    }

    /// Notice sent to the remaining members when `user` leaves the room.
    pub fn departure(locale: Locale, user: Option<&UserIdentity>) -> Self {
        let name = display_name(locale, user);
        let chat = match locale {
            Locale::Ko => format!("{name}님이 퇴장하셨습니다."),
            Locale::En => format!("{name} left the room."),
        };
        Self::system(chat)
    }

    fn system(chat: String) -> Self {
        Self {
            user: SYSTEM_SENDER.to_string(),
            chat,
        }
    }
}

fn display_name(locale: Locale, user: Option<&UserIdentity>) -> String {
    match (user, locale) {
        (Some(user), _) => user.nickname.as_str().to_string(),
        (None, Locale::Ko) => "알 수 없는 사용자".to_string(),
        (None, Locale::En) => "Someone".to_string(),
    }
}

/// A chat message as sent by a client.
///
/// The payload is relayed verbatim; only the target room is read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatPayload(serde_json::Value);

impl ChatPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Room named by the payload's `RoomId` field.
    pub fn target_room(&self) -> RoomAssignment {
        RoomAssignment::from_chat_target(self.0.get(CHAT_TARGET_FIELD))
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}
