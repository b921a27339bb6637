//! GetIntakeProgressHandler - Query handler for a session's current state.

use std::sync::Arc;

use crate::domain::foundation::ConversationKey;
use crate::domain::intake::{CollectionStateMachine, IntakeSession, PromptSpec};
use crate::ports::SessionStore;

use super::IntakeError;

/// Query for one conversation's intake progress.
#[derive(Debug, Clone)]
pub struct GetIntakeProgressQuery {
    pub key: ConversationKey,
}

/// Snapshot of a session plus what it is waiting for.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeProgress {
    pub session: IntakeSession,
    /// `None` once every field is filled.
    pub prompt: Option<PromptSpec>,
    pub total_fields: usize,
}

/// Handler for progress queries.
pub struct GetIntakeProgressHandler {
    store: Arc<dyn SessionStore>,
    machine: CollectionStateMachine,
}

impl GetIntakeProgressHandler {
    pub fn new(store: Arc<dyn SessionStore>, machine: CollectionStateMachine) -> Self {
        Self { store, machine }
    }

    pub async fn handle(&self, query: GetIntakeProgressQuery) -> Result<IntakeProgress, IntakeError> {
        let session = self
            .store
            .load(&query.key)
            .await?
            .ok_or_else(|| IntakeError::not_found(&query.key))?;

        Ok(IntakeProgress {
            prompt: self.machine.prompt(&session),
            total_fields: self.machine.schema().len(),
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::intake::{churn_schema, RawInput};

    #[tokio::test]
    async fn progress_reports_current_prompt() {
        let store = Arc::new(InMemorySessionStore::new());
        let machine = CollectionStateMachine::new(churn_schema());
        let key = ConversationKey::chat(8);
        let mut session = machine.start();
        machine
            .advance_current(&mut session, &RawInput::selection("0"))
            .unwrap();
        store.save(&key, &session).await.unwrap();

        let handler = GetIntakeProgressHandler::new(store, machine);
        let progress = handler.handle(GetIntakeProgressQuery { key }).await.unwrap();

        assert_eq!(progress.total_fields, 18);
        assert_eq!(progress.session.filled_count(), 1);
        assert_eq!(progress.prompt.map(|p| p.field), Some("Partner".to_string()));
    }

    #[tokio::test]
    async fn unknown_conversation_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = GetIntakeProgressHandler::new(store, CollectionStateMachine::new(churn_schema()));

        let result = handler
            .handle(GetIntakeProgressQuery { key: ConversationKey::chat(9) })
            .await;

        assert!(matches!(result, Err(IntakeError::NotFound(_))));
    }
}
