//! ScoringService - turns an assembled record into a verdict.
//!
//! Wraps the [`ChurnScorer`] port with a hard timeout. Every failure of the
//! backend (unreachable, slow, nonsense output) collapses into one
//! user-visible outcome. There is no retry.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::intake::ScoredRecord;
use crate::domain::scoring::Verdict;
use crate::ports::{ChurnScorer, ScorerError};

/// Scoring could not produce a verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Scoring is unavailable: {0}")]
    Unavailable(#[from] ScorerError),
}

impl ScoringError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ScoringUnavailable
    }

    /// Text safe to show to end users.
    pub fn user_message(&self) -> &'static str {
        "Sorry, the prediction service is unavailable right now. Please try again later."
    }
}

/// Application service around the scorer port.
#[derive(Clone)]
pub struct ScoringService {
    scorer: Arc<dyn ChurnScorer>,
    timeout: Duration,
}

impl ScoringService {
    pub fn new(scorer: Arc<dyn ChurnScorer>, timeout: Duration) -> Self {
        Self { scorer, timeout }
    }

    /// Scores `record` once, giving up after the configured timeout.
    pub async fn score(&self, record: &ScoredRecord) -> Result<Verdict, ScoringError> {
        let outcome = tokio::time::timeout(self.timeout, self.scorer.score(record))
            .await
            .unwrap_or(Err(ScorerError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }));

        match outcome {
            Ok(probability) => {
                let verdict = Verdict::from_probability(probability);
                tracing::info!(
                    scorer = self.scorer.name(),
                    label = %verdict.label,
                    churn_probability = probability.value(),
                    "Record scored"
                );
                Ok(verdict)
            }
            Err(err) => {
                tracing::error!(scorer = self.scorer.name(), error = %err, "Scoring failed");
                Err(err.into())
            }
        }
    }
}

impl std::fmt::Debug for ScoringService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringService")
            .field("scorer", &self.scorer.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scoring::MockChurnScorer;
    use crate::domain::intake::{churn_schema, CollectionStateMachine};
    use crate::domain::scoring::ChurnLabel;

    fn record() -> ScoredRecord {
        let machine = CollectionStateMachine::new(churn_schema());
        machine.assemble(&machine.start())
    }

    #[tokio::test]
    async fn probability_becomes_verdict() {
        let service = ScoringService::new(
            Arc::new(MockChurnScorer::returning(73.5)),
            Duration::from_secs(1),
        );

        let verdict = service.score(&record()).await.unwrap();

        assert_eq!(verdict.label, ChurnLabel::Leaves);
        assert_eq!(verdict.summary(), "Prediction: LEAVES (73.5% confidence)");
    }

    #[tokio::test]
    async fn scorer_failure_is_unavailable() {
        let service = ScoringService::new(
            Arc::new(MockChurnScorer::failing(ScorerError::unavailable("down"))),
            Duration::from_secs(1),
        );

        let err = service.score(&record()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ScoringUnavailable);
    }

    #[tokio::test]
    async fn slow_scorer_times_out_without_retry() {
        let scorer = MockChurnScorer::returning(10.0).with_delay(Duration::from_millis(500));
        let service = ScoringService::new(Arc::new(scorer.clone()), Duration::from_millis(20));

        let err = service.score(&record()).await.unwrap_err();

        assert!(matches!(err, ScoringError::Unavailable(ScorerError::Timeout { .. })));
        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_output_is_unavailable() {
        let service = ScoringService::new(
            Arc::new(MockChurnScorer::returning(f64::NAN)),
            Duration::from_secs(1),
        );

        let err = service.score(&record()).await.unwrap_err();

        assert!(matches!(err, ScoringError::Unavailable(ScorerError::MalformedOutput(_))));
    }
}
