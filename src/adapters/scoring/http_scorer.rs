//! HTTP scoring adapter.
//!
//! Posts the assembled record to a model-serving endpoint:
//!
//! ```text
//! POST {endpoint}
//! {"features": {"SeniorCitizen": 0, "Partner": "Yes", ...}}
//!
//! 200 OK
//! {"churn_probability": 0.7312}
//! ```
//!
//! The endpoint answers with a fraction in `[0, 1]`, scaled to a percentage.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::Probability;
use crate::domain::intake::ScoredRecord;
use crate::ports::{ChurnScorer, ScorerError};

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    features: &'a ScoredRecord,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    churn_probability: f64,
}

/// Scorer backed by a remote model-serving endpoint.
#[derive(Debug, Clone)]
pub struct HttpChurnScorer {
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl HttpChurnScorer {
    /// Creates a scorer posting to `endpoint` with a per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ScorerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScorerError::unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout,
            client,
        })
    }

    async fn send_request(&self, record: &ScoredRecord) -> Result<Response, ScorerError> {
        self.client
            .post(&self.endpoint)
            .json(&ScoreRequest { features: record })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScorerError::Timeout {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ScorerError::unavailable(format!("Connection failed: {}", e))
                } else {
                    ScorerError::unavailable(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, ScorerError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            400 | 422 => Err(ScorerError::malformed(format!(
                "Scorer refused record ({}): {}",
                status, error_body
            ))),
            _ => Err(ScorerError::unavailable(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl ChurnScorer for HttpChurnScorer {
    async fn score(&self, record: &ScoredRecord) -> Result<Probability, ScorerError> {
        let response = self.send_request(record).await?;
        let response = self.handle_response_status(response).await?;

        let body: ScoreResponse = response
            .json()
            .await
            .map_err(|e| ScorerError::malformed(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            churn_probability = body.churn_probability,
            "Scorer responded"
        );

        Ok(Probability::from_fraction(body.churn_probability)?)
    }

    fn name(&self) -> &str {
        "http"
    }
}
