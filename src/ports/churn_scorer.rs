//! Churn Scorer Port - Interface for the external scoring model.
//!
//! The model itself is opaque: it receives a fully assembled record and
//! returns a churn probability, or fails.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct ConstantScorer;
//!
//! #[async_trait]
//! impl ChurnScorer for ConstantScorer {
//!     async fn score(&self, _record: &ScoredRecord) -> Result<Probability, ScorerError> {
//!         Ok(Probability::try_new(42.0)?)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "constant"
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{Probability, ValidationError};
use crate::domain::intake::ScoredRecord;

/// Port for the churn scoring model.
#[async_trait]
pub trait ChurnScorer: Send + Sync {
    /// Scores one record, returning the churn probability on a 0-100 scale.
    async fn score(&self, record: &ScoredRecord) -> Result<Probability, ScorerError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Failures of the scoring backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScorerError {
    #[error("Scorer unavailable: {0}")]
    Unavailable(String),

    #[error("Scorer returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("Scorer timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl ScorerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ScorerError::Unavailable(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ScorerError::MalformedOutput(message.into())
    }
}

impl From<ValidationError> for ScorerError {
    fn from(err: ValidationError) -> Self {
        ScorerError::MalformedOutput(err.to_string())
    }
}
