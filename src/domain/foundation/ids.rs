//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for one intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Transport-specific identity under which a session is stored.
///
/// A Telegram chat and an HTTP client never share a key, so sessions
/// from different front ends cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "transport", content = "id", rename_all = "snake_case")]
pub enum ConversationKey {
    /// Telegram chat identifier.
    Chat(i64),
    /// Session created through the HTTP API.
    Http(SessionId),
}

impl ConversationKey {
    pub fn chat(chat_id: i64) -> Self {
        ConversationKey::Chat(chat_id)
    }

    pub fn http(session_id: SessionId) -> Self {
        ConversationKey::Http(session_id)
    }

    /// Session id fixed by the key itself, if the transport assigns one.
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            ConversationKey::Http(id) => Some(*id),
            ConversationKey::Chat(_) => None,
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationKey::Chat(id) => write!(f, "chat:{}", id),
            ConversationKey::Http(id) => write!(f, "http:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_new_generates_unique_ids() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn session_id_parses_from_string() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }

    #[test]
    fn conversation_keys_from_different_transports_differ() {
        let http = ConversationKey::http(SessionId::new());
        let chat = ConversationKey::chat(42);
        assert_ne!(http, chat);
        assert_eq!(chat.to_string(), "chat:42");
        assert!(chat.session_id().is_none());
        assert!(http.session_id().is_some());
    }

    #[test]
    fn conversation_key_serializes_with_transport_tag() {
        let json = serde_json::to_value(ConversationKey::chat(7)).unwrap();
        assert_eq!(json["transport"], "chat");
        assert_eq!(json["id"], 7);
    }
}
