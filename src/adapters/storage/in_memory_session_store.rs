//! In-Memory Session Store Adapter
//!
//! Keeps one intake session per conversation in process memory.
//! Sessions do not survive a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationKey, Timestamp};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<ConversationKey, IntakeSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &ConversationKey) -> Result<Option<IntakeSession>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(key).cloned())
    }

    async fn save(&self, key: &ConversationKey, session: &IntakeSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(key.clone(), session.clone());
        Ok(())
    }

    async fn remove(&self, key: &ConversationKey) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(key);
        Ok(())
    }

    async fn evict_idle(&self, cutoff: Timestamp) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle_since(&cutoff));
        Ok(before - sessions.len())
    }
}
