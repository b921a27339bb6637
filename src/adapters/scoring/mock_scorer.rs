//! Mock churn scorer for development and tests.
//!
//! Returns a configured probability or a configured failure, and records
//! every record it was asked to score.
//!
//! # Example
//!
//! ```ignore
//! let scorer = MockChurnScorer::returning(73.5);
//! let p = scorer.score(&record).await?;
//! assert_eq!(scorer.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::Probability;
use crate::domain::intake::ScoredRecord;
use crate::ports::{ChurnScorer, ScorerError};

/// What the mock answers with.
#[derive(Debug, Clone)]
enum MockOutcome {
    Probability(f64),
    Error(ScorerError),
}

/// Configurable in-process scorer.
#[derive(Debug, Clone)]
pub struct MockChurnScorer {
    outcome: MockOutcome,
    delay: Duration,
    calls: Arc<Mutex<Vec<ScoredRecord>>>,
}

impl MockChurnScorer {
    /// Scorer that always answers with `probability` (0-100 scale).
    ///
    /// Values outside the range surface as malformed output when scored.
    pub fn returning(probability: f64) -> Self {
        Self {
            outcome: MockOutcome::Probability(probability),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scorer that always fails with `error`.
    pub fn failing(error: ScorerError) -> Self {
        Self {
            outcome: MockOutcome::Error(error),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of records scored.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Returns all recorded records.
    pub fn get_calls(&self) -> Vec<ScoredRecord> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChurnScorer for MockChurnScorer {
    async fn score(&self, record: &ScoredRecord) -> Result<Probability, ScorerError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(record.clone());
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.outcome {
            MockOutcome::Probability(p) => Ok(Probability::try_new(*p)?),
            MockOutcome::Error(err) => Err(err.clone()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
