//! Batch collection - drives the state machine over a whole submitted form.

use std::collections::HashMap;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

use super::machine::{CollectionStateMachine, ProtocolError, Transition};
use super::session::IntakeSession;
use super::validation::RejectionReason;
use super::value::RawInput;

/// First problem found in a submitted field set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchRejection {
    #[error("Missing value for '{field}'")]
    Missing { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    Rejected {
        field: String,
        reason: RejectionReason,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl BatchRejection {
    pub fn field(&self) -> Option<&str> {
        match self {
            BatchRejection::Missing { field } | BatchRejection::Rejected { field, .. } => {
                Some(field)
            }
            BatchRejection::Protocol(_) => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BatchRejection::Missing { .. } => ErrorCode::MissingField,
            BatchRejection::Rejected { reason, .. } => reason.code(),
            BatchRejection::Protocol(err) => err.code(),
        }
    }
}

impl CollectionStateMachine {
    /// Feeds every field of `submitted` through [`advance`](Self::advance) in
    /// schema order, stopping at the first failure.
    ///
    /// Returns a completed session, or the first rejection; nothing is kept
    /// from a rejected submission. Keys not in the schema are ignored.
    pub fn collect_batch(
        &self,
        submitted: &HashMap<String, String>,
    ) -> Result<IntakeSession, BatchRejection> {
        let mut session = self.start();

        for field in self.schema().fields() {
            let raw = submitted
                .get(&field.name)
                .ok_or_else(|| BatchRejection::Missing {
                    field: field.name.clone(),
                })?;

            let transition =
                self.advance(&mut session, field, &RawInput::selection(raw.as_str()))?;
            if let Transition::Rejected { reason, .. } = transition {
                return Err(BatchRejection::Rejected {
                    field: field.name.clone(),
                    reason,
                });
            }
        }

        Ok(session)
    }
}
