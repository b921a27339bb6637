//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid socket address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid scoring endpoint URL: {0}")]
    InvalidScoringEndpoint(String),

    #[error("Invalid scoring timeout")]
    InvalidScoringTimeout,

    #[error("Mock probability must be between 0 and 100, got {0}")]
    InvalidMockProbability(f64),

    #[error("Session idle timeout and sweep interval must be positive")]
    InvalidSessionTiming,

    #[error("Mock scorer is not allowed in production")]
    MockScorerInProduction,
}
