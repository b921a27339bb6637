//! CancelIntakeHandler - Command handler for abandoning the current answers.

use std::sync::Arc;

use crate::domain::foundation::ConversationKey;
use crate::domain::intake::CollectionStateMachine;
use crate::ports::SessionStore;

use super::{IntakeError, IntakeReply};

/// Command to cancel the intake in progress.
#[derive(Debug, Clone)]
pub struct CancelIntakeCommand {
    pub key: ConversationKey,
}

/// Handler for cancelling intakes.
///
/// Cancelling resets the session rather than deleting it; the next answer
/// goes to the first field again.
pub struct CancelIntakeHandler {
    store: Arc<dyn SessionStore>,
    machine: CollectionStateMachine,
}

impl CancelIntakeHandler {
    pub fn new(store: Arc<dyn SessionStore>, machine: CollectionStateMachine) -> Self {
        Self { store, machine }
    }

    pub async fn handle(&self, cmd: CancelIntakeCommand) -> Result<IntakeReply, IntakeError> {
        let mut session = self
            .store
            .load(&cmd.key)
            .await?
            .ok_or_else(|| IntakeError::not_found(&cmd.key))?;

        self.machine.cancel(&mut session);
        self.store.save(&cmd.key, &session).await?;

        tracing::info!(session_id = %session.id(), conversation = %cmd.key, "Intake cancelled");
        Ok(IntakeReply::Cancelled {
            prompt: self.machine.prompt(&session),
            session,
        })
    }
}
