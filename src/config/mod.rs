//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHURN_INTAKE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use churn_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod scoring;
mod server;
mod session;
mod telegram;

pub use error::{ConfigError, ValidationError};
pub use scoring::{ScoringConfig, ScoringProvider};
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;
pub use telegram::TelegramConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; an empty environment yields a development
/// configuration that only lacks a scoring endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Scoring backend (HTTP model endpoint or mock)
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Telegram bot front end
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Session lifetime and idle eviction
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHURN_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHURN_INTAKE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHURN_INTAKE__SCORING__ENDPOINT=...` -> `scoring.endpoint = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHURN_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.scoring.validate()?;
        self.telegram.validate()?;
        self.session.validate()?;

        if self.is_production() && self.scoring.provider == ScoringProvider::Mock {
            return Err(ValidationError::MockScorerInProduction);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
