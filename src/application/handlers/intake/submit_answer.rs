//! SubmitAnswerHandler - Command handler for one answer event.

use std::sync::Arc;

use crate::application::scoring::ScoringService;
use crate::domain::foundation::ConversationKey;
use crate::domain::intake::{CollectionStateMachine, RawInput, Transition};
use crate::ports::SessionStore;

use super::reply::finish_session;
use super::{IntakeError, IntakeReply};

/// Which field an answer is meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerTarget {
    /// Whatever field the session is waiting for (free text).
    Current,
    /// The field at this position (button presses carry it).
    Order(usize),
    /// The field with this name.
    Named(String),
}

/// Command to apply one answer to a conversation's session.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub key: ConversationKey,
    pub target: AnswerTarget,
    pub input: RawInput,
}

/// Handler for answer events.
pub struct SubmitAnswerHandler {
    store: Arc<dyn SessionStore>,
    machine: CollectionStateMachine,
    scoring: ScoringService,
}

impl SubmitAnswerHandler {
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

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<IntakeReply, IntakeError> {
        let mut session = self
            .store
            .load(&cmd.key)
            .await?
            .ok_or_else(|| IntakeError::not_found(&cmd.key))?;

        let result = match &cmd.target {
            AnswerTarget::Current => self.machine.advance_current(&mut session, &cmd.input),
            AnswerTarget::Order(order) => self.machine.advance_at(&mut session, *order, &cmd.input),
            AnswerTarget::Named(name) => self.machine.advance_named(&mut session, name, &cmd.input),
        };

        let transition = result.map_err(|err| {
            tracing::warn!(
                session_id = %session.id(),
                conversation = %cmd.key,
                error = %err,
                "Ignoring out-of-protocol input"
            );
            IntakeError::from(err)
        })?;

        match transition {
            Transition::Advanced { prompt } => {
                self.store.save(&cmd.key, &session).await?;
                Ok(IntakeReply::Prompt { session, prompt })
            }
            Transition::Rejected { reason, prompt } => {
                tracing::debug!(
                    session_id = %session.id(),
                    field = %prompt.field,
                    reason = %reason,
                    "Answer rejected"
                );
                Ok(IntakeReply::Rejected {
                    session,
                    reason,
                    prompt,
                })
            }
            Transition::Completed => {
                finish_session(&self.store, &self.machine, &self.scoring, &cmd.key, &session).await
            }
            Transition::Cancelled => {
                self.store.save(&cmd.key, &session).await?;
                Ok(IntakeReply::Cancelled {
                    prompt: self.machine.prompt(&session),
                    session,
                })
            }
        }
    }
}
