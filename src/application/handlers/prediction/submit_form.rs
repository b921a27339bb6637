//! SubmitFormHandler - scores a whole field set submitted at once.
//!
//! The form goes through the same transitions as a chat, one field at a
//! time in schema order. The first failure rejects the whole submission.

use std::collections::HashMap;

use thiserror::Error;

use crate::application::scoring::{ScoringError, ScoringService};
use crate::domain::foundation::ErrorCode;
use crate::domain::intake::{BatchRejection, CollectionStateMachine, ScoredRecord};
use crate::domain::scoring::Verdict;

/// Command carrying every submitted form field as raw text.
#[derive(Debug, Clone, Default)]
pub struct SubmitFormCommand {
    pub fields: HashMap<String, String>,
}

/// Verdict plus the record that was scored.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitFormResult {
    pub record: ScoredRecord,
    pub verdict: Verdict,
}

/// Why a form submission produced no verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// A field was missing or invalid. Nothing was scored.
    #[error(transparent)]
    Rejected(#[from] BatchRejection),

    /// Every field was valid but scoring failed.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl PredictionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PredictionError::Rejected(rejection) => rejection.code(),
            PredictionError::Scoring(err) => err.code(),
        }
    }

    /// Offending field, when the submission was rejected.
    pub fn field(&self) -> Option<&str> {
        match self {
            PredictionError::Rejected(rejection) => rejection.field(),
            PredictionError::Scoring(_) => None,
        }
    }

    /// Text safe to show to end users.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Rejected(rejection) => rejection.to_string(),
            PredictionError::Scoring(err) => err.user_message().to_string(),
        }
    }
}

/// Handler for web form submissions.
pub struct SubmitFormHandler {
    machine: CollectionStateMachine,
    scoring: ScoringService,
}

impl SubmitFormHandler {
    pub fn new(machine: CollectionStateMachine, scoring: ScoringService) -> Self {
        Self { machine, scoring }
    }

    pub async fn handle(&self, cmd: SubmitFormCommand) -> Result<SubmitFormResult, PredictionError> {
        let session = self.machine.collect_batch(&cmd.fields).map_err(|rejection| {
            tracing::debug!(
                field = rejection.field().unwrap_or_default(),
                code = %rejection.code(),
                "Form submission rejected"
            );
            rejection
        })?;

        let record = self.machine.assemble(&session);
        let verdict = self.scoring.score(&record).await?;

        Ok(SubmitFormResult { record, verdict })
    }
}
