//! Chat platform configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: Option<Secret<String>>,
}

impl TelegramConfig {
    /// Check if a bot token is configured
    pub fn has_bot_token(&self) -> bool {
        self.bot_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().trim().is_empty())
    }

    /// Validate chat platform configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_bot_token() {
            return Err(ValidationError::MissingRequired(
                "PROMPT_FORGE__TELEGRAM__BOT_TOKEN",
            ));
        }
        Ok(())
    }
}
