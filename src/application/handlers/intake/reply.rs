//! What an intake event produced, for the transport to render.

use std::sync::Arc;

use crate::application::scoring::{ScoringError, ScoringService};
use crate::domain::foundation::{ConversationKey, SessionId};
use crate::domain::intake::{
    CollectionStateMachine, IntakeSession, PromptSpec, RejectionReason, ScoredRecord,
};
use crate::domain::scoring::Verdict;
use crate::ports::SessionStore;

use super::IntakeError;

/// Outcome of one intake event.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeReply {
    /// Waiting for `prompt.field`.
    Prompt {
        session: IntakeSession,
        prompt: PromptSpec,
    },
    /// The value was refused; the same field is asked again.
    Rejected {
        session: IntakeSession,
        reason: RejectionReason,
        prompt: PromptSpec,
    },
    /// All fields collected and scored. The session is gone.
    Completed {
        session_id: SessionId,
        record: ScoredRecord,
        verdict: Verdict,
    },
    /// All fields collected but scoring failed. The session is gone.
    ScoringFailed {
        session_id: SessionId,
        error: ScoringError,
    },
    /// Answers cleared; the session waits at the first field again.
    Cancelled {
        session: IntakeSession,
        prompt: Option<PromptSpec>,
    },
}

impl IntakeReply {
    /// True when the conversation's session no longer exists.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            IntakeReply::Completed { .. } | IntakeReply::ScoringFailed { .. }
        )
    }
}

/// Assembles and scores a finished session, removing it from the store.
///
/// The session ends whether or not scoring succeeds.
pub(super) async fn finish_session(
    store: &Arc<dyn SessionStore>,
    machine: &CollectionStateMachine,
    scoring: &ScoringService,
    key: &ConversationKey,
    session: &IntakeSession,
) -> Result<IntakeReply, IntakeError> {
    let record = machine.assemble(session);
    store.remove(key).await?;

    match scoring.score(&record).await {
        Ok(verdict) => {
            tracing::info!(
                session_id = %session.id(),
                conversation = %key,
                label = %verdict.label,
                "Intake completed"
            );
            Ok(IntakeReply::Completed {
                session_id: session.id(),
                record,
                verdict,
            })
        }
        Err(error) => Ok(IntakeReply::ScoringFailed {
            session_id: session.id(),
            error,
        }),
    }
}
