//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use url::Url;

use super::error::ValueObjectError;

/// Channel key used when no room identifier could be resolved.
pub const UNDEFINED_CHANNEL: &str = "undefined";

/// Room identifier value object.
///
/// An opaque token that keys one room channel of the chat namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.len();
        if len > 100 {
            return Err(ValueObjectError::RoomIdTooLong {
                max: 100,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::NicknameEmpty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The room channel a socket is assigned to.
///
/// A socket whose room identifier cannot be resolved still lands in a
/// channel: the shared `"undefined"` one. Peers of that channel receive each
/// other's notices, and emptying it requests deletion of room `undefined`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomAssignment {
    Room(RoomId),
    Undefined,
}

impl RoomAssignment {
    /// Resolve the room from the referring page URL.
    ///
    /// The identifier is the value of the query parameter named `param`.
    /// A missing or unparsable referer, a missing parameter or a value that
    /// is not a valid [`RoomId`] all resolve to [`RoomAssignment::Undefined`].
    pub fn from_referer(referer: Option<&str>, param: &str) -> Self {
        let Some(referer) = referer else {
            return Self::Undefined;
        };
        let Ok(url) = Url::parse(referer) else {
            return Self::Undefined;
        };

        match url.query_pairs().find(|(key, _)| key == param) {
            Some((_, value)) => Self::from_raw_id(value.into_owned()),
            None => Self::Undefined,
        }
    }

    /// Resolve the room targeted by a chat payload's `RoomId` field.
    ///
    /// Both string and numeric identifiers are accepted.
    pub fn from_chat_target(target: Option<&serde_json::Value>) -> Self {
        let raw = match target {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Self::Undefined,
        };
        Self::from_raw_id(raw)
    }

    /// A present but invalid id (empty, too long) is logged before it falls
    /// into the undefined channel, so it can be told apart from a missing one.
    fn from_raw_id(raw: String) -> Self {
        match RoomId::new(raw) {
            Ok(id) => Self::Room(id),
            Err(e) => {
                tracing::warn!(
                    "Rejected room id ({}); using the '{}' channel",
                    e,
                    UNDEFINED_CHANNEL
                );
                Self::Undefined
            }
        }
    }

    /// Key of the socket-library channel for this assignment.
    pub fn channel(&self) -> &str {
        match self {
            Self::Room(id) => id.as_str(),
            Self::Undefined => UNDEFINED_CHANNEL,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for RoomAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.channel())
    }
}

/// Language of the system notices broadcast to a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            other => Err(ValueObjectError::UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ko => f.write_str("ko"),
            Self::En => f.write_str("en"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_id_validation() {
        // テスト項目: RoomId は空文字と長すぎる文字列を拒否する
        // then (期待する結果):
        assert!(RoomId::new("42".to_string()).is_ok());
        assert_eq!(
            RoomId::new(String::new()),
            Err(ValueObjectError::RoomIdEmpty)
        );
        assert_eq!(
            RoomId::new("a".repeat(101)),
            Err(ValueObjectError::RoomIdTooLong {
                max: 100,
                actual: 101
            })
        );
    }

    #[test]
    fn test_from_referer_named_parameter() {
        // テスト項目: referer の名前付きクエリパラメータから RoomId を取り出す
        // when (操作):
        let assignment =
            RoomAssignment::from_referer(Some("http://localhost:3000/room?id=42&password=x"), "id");

        // then (期待する結果):
        assert_eq!(
            assignment,
            RoomAssignment::Room(RoomId::new("42".to_string()).unwrap())
        );
        assert_eq!(assignment.channel(), "42");
    }

    #[test]
    fn test_from_referer_parameter_not_first() {
        // テスト項目: パラメータの位置に関係なく名前で取り出す
        // when (操作):
        let assignment =
            RoomAssignment::from_referer(Some("http://localhost:3000/room?password=x&id=7"), "id");

        // then (期待する結果):
        assert_eq!(assignment.channel(), "7");
    }

    #[test]
    fn test_from_referer_decodes_value() {
        // テスト項目: パーセントエンコードされた値はデコードされる
        // when (操作):
        let assignment =
            RoomAssignment::from_referer(Some("http://localhost/room?id=lobby%20one"), "id");

        // then (期待する結果):
        assert_eq!(assignment.channel(), "lobby one");
    }

    #[test]
    fn test_from_referer_malformed_cases_are_undefined() {
        // テスト項目: referer が無い・壊れている・パラメータが無い場合は Undefined になり、パニックしない
        // then (期待する結果):
        assert!(RoomAssignment::from_referer(None, "id").is_undefined());
        assert!(RoomAssignment::from_referer(Some("not a url"), "id").is_undefined());
        assert!(RoomAssignment::from_referer(Some("http://localhost/room/42"), "id").is_undefined());
        assert!(RoomAssignment::from_referer(Some("http://localhost/room?other=1"), "id").is_undefined());
        assert!(RoomAssignment::from_referer(Some("http://localhost/room?id="), "id").is_undefined());
    }

    #[test]
    fn test_from_referer_length_boundary() {
        // テスト項目: 100 バイトの id はルームになり、101 バイトの id は拒否されて Undefined になる
        // given (前提条件):
        let longest = "r".repeat(100);
        let too_long = "r".repeat(101);

        // when (操作):
        let accepted =
            RoomAssignment::from_referer(Some(&format!("http://localhost/room?id={longest}")), "id");
        let rejected =
            RoomAssignment::from_referer(Some(&format!("http://localhost/room?id={too_long}")), "id");

        // then (期待する結果):
        assert_eq!(accepted.channel(), longest);
        assert!(rejected.is_undefined());
        assert!(RoomAssignment::from_chat_target(Some(&json!(too_long))).is_undefined());
    }

    #[test]
    fn test_undefined_channel_key() {
        // テスト項目: Undefined の channel key は "undefined"
        assert_eq!(RoomAssignment::Undefined.channel(), UNDEFINED_CHANNEL);
        assert_eq!(RoomAssignment::Undefined.to_string(), "undefined");
    }

    #[test]
    fn test_from_chat_target() {
        // テスト項目: chat ペイロードの RoomId は文字列・数値どちらでも解決できる
        // then (期待する結果):
        assert_eq!(
            RoomAssignment::from_chat_target(Some(&json!("42"))).channel(),
            "42"
        );
        assert_eq!(
            RoomAssignment::from_chat_target(Some(&json!(42))).channel(),
            "42"
        );
        assert!(RoomAssignment::from_chat_target(None).is_undefined());
        assert!(RoomAssignment::from_chat_target(Some(&json!(null))).is_undefined());
        assert!(RoomAssignment::from_chat_target(Some(&json!(""))).is_undefined());
    }

    #[test]
    fn test_nickname_rejects_blank() {
        // テスト項目: 空白のみのニックネームは拒否される
        assert_eq!(
            Nickname::new("  ".to_string()),
            Err(ValueObjectError::NicknameEmpty)
        );
        assert_eq!(Nickname::new("민수".to_string()).unwrap().as_str(), "민수");
    }

    #[test]
    fn test_locale_from_str() {
        // テスト項目: Locale は大文字小文字を区別せずにパースできる
        assert_eq!("ko".parse::<Locale>(), Ok(Locale::Ko));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(ValueObjectError::UnknownLocale("fr".to_string()))
        );
    }
}
