//! Session Store Port - Interface for keeping intake sessions between events.
//!
//! Each conversation owns exactly one session under its [`ConversationKey`];
//! stores never expose one conversation's session to another.

use async_trait::async_trait;

use crate::domain::foundation::{ConversationKey, Timestamp};
use crate::domain::intake::IntakeSession;

/// Errors that can occur during session storage operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for keyed, per-conversation session storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session for a conversation, if one is active.
    async fn load(&self, key: &ConversationKey) -> Result<Option<IntakeSession>, SessionStoreError>;

    /// Save (insert or replace) the session for a conversation.
    async fn save(&self, key: &ConversationKey, session: &IntakeSession) -> Result<(), SessionStoreError>;

    /// Remove the session for a conversation. Removing a missing key is not an error.
    async fn remove(&self, key: &ConversationKey) -> Result<(), SessionStoreError>;

    /// Remove every session not updated since `cutoff`.
    ///
    /// # Returns
    /// The number of sessions evicted
    async fn evict_idle(&self, cutoff: Timestamp) -> Result<usize, SessionStoreError>;
}
