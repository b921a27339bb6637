//! Telegram bot configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    /// Run the bot alongside the HTTP server
    #[serde(default)]
    pub enabled: bool,

    /// Bot API token from @BotFather
    pub bot_token: Option<SecretString>,
}

impl TelegramConfig {
    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && !self.has_token() {
            return Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"));
        }
        Ok(())
    }

    fn has_token(&self) -> bool {
        self.bot_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_bot_needs_no_token() {
        assert!(TelegramConfig::default().validate().is_ok());
    }

    #[test]
    fn enabled_bot_requires_token() {
        let config = TelegramConfig {
            enabled: true,
            bot_token: None,
        };
        assert!(config.validate().is_err());

        let config = TelegramConfig {
            enabled: true,
            bot_token: Some(SecretString::new("123:abc".to_string())),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let config = TelegramConfig {
            enabled: true,
            bot_token: Some(SecretString::new("123:secret".to_string())),
        };
        assert!(!format!("{:?}", config).contains("123:secret"));
    }
}
