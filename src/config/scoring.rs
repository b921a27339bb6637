//! Scoring backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Scoring backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Which scorer to use
    #[serde(default)]
    pub provider: ScoringProvider,

    /// Model-serving endpoint, required for the `http` provider
    pub endpoint: Option<String>,

    /// Upper bound on one scoring call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Fixed probability (0-100) returned by the `mock` provider
    #[serde(default = "default_mock_probability")]
    pub mock_probability: f64,
}

/// Scorer implementation
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringProvider {
    #[default]
    Http,
    Mock,
}

impl ScoringConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidScoringTimeout);
        }

        match self.provider {
            ScoringProvider::Http => {
                let endpoint = self
                    .endpoint
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .ok_or(ValidationError::MissingRequired("SCORING__ENDPOINT"))?;
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err(ValidationError::InvalidScoringEndpoint(endpoint.to_string()));
                }
            }
            ScoringProvider::Mock => {
                if !(0.0..=100.0).contains(&self.mock_probability) {
                    return Err(ValidationError::InvalidMockProbability(self.mock_probability));
                }
            }
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            provider: ScoringProvider::default(),
            endpoint: None,
            timeout_secs: default_timeout(),
            mock_probability: default_mock_probability(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_mock_probability() -> f64 {
    50.0
}
