//! StartIntakeHandler - Command handler for (re)starting an intake.

use std::sync::Arc;

use crate::application::scoring::ScoringService;
use crate::domain::foundation::ConversationKey;
use crate::domain::intake::CollectionStateMachine;
use crate::ports::SessionStore;

use super::reply::finish_session;
use super::{IntakeError, IntakeReply};

/// Command to start an intake, discarding any answers already given.
#[derive(Debug, Clone)]
pub struct StartIntakeCommand {
    pub key: ConversationKey,
}

/// Handler for starting intakes.
pub struct StartIntakeHandler {
    store: Arc<dyn SessionStore>,
    machine: CollectionStateMachine,
    scoring: ScoringService,
}

impl StartIntakeHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        machine: CollectionStateMachine,
        scoring: ScoringService,
    ) -> Self {
        Self {
            store,
            machine,
            scoring,
        }
    }

    pub async fn handle(&self, cmd: StartIntakeCommand) -> Result<IntakeReply, IntakeError> {
        let mut session = match self.store.load(&cmd.key).await? {
            Some(existing) => existing,
            None => match cmd.key.session_id() {
                Some(id) => self.machine.start_with_id(id),
                None => self.machine.start(),
            },
        };

        let prompt = self.machine.restart(&mut session);
        tracing::info!(session_id = %session.id(), conversation = %cmd.key, "Intake started");

        match prompt {
            Some(prompt) => {
                self.store.save(&cmd.key, &session).await?;
                Ok(IntakeReply::Prompt { session, prompt })
            }
            None => {
                finish_session(&self.store, &self.machine, &self.scoring, &cmd.key, &session).await
            }
        }
    }
}
