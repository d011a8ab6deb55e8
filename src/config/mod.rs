//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PROMPT_FORGE` prefix and nested values use double underscores as separators.
//!
//! The unprefixed `TELEGRAM_BOT_TOKEN` and `DEEPSEEK_API_KEY` variables are
//! honoured as fallbacks when the prefixed ones are absent.
//!
//! # Example
//!
//! ```no_run
//! use prompt_forge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.ai.model);
//! ```

mod ai;
mod error;
mod limits;
mod telegram;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use limits::LimitsConfig;
pub use telegram::TelegramConfig;

use serde::Deserialize;

/// Unprefixed variable read when `PROMPT_FORGE__TELEGRAM__BOT_TOKEN` is absent.
pub const LEGACY_BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Unprefixed variable read when `PROMPT_FORGE__AI__API_KEY` is absent.
pub const LEGACY_API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Chat platform configuration (bot token)
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Completion API configuration (key, endpoint, model, retry budget)
    #[serde(default)]
    pub ai: AiConfig,

    /// Per-user limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Seeds secrets from the legacy unprefixed variables
    /// 3. Reads environment variables with `PROMPT_FORGE` prefix, which win
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROMPT_FORGE__AI__MODEL=deepseek-chat` -> `ai.model = deepseek-chat`
    /// - `PROMPT_FORGE__LIMITS__REQUESTS_PER_MINUTE=10` -> `limits.requests_per_minute = 10`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(token) = std::env::var(LEGACY_BOT_TOKEN_VAR) {
            builder = builder.set_default("telegram.bot_token", token)?;
        }
        if let Ok(key) = std::env::var(LEGACY_API_KEY_VAR) {
            builder = builder.set_default("ai.api_key", key)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("PROMPT_FORGE")
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
    /// Returns `ValidationError` for the first missing secret or
    /// out-of-range value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.telegram.validate()?;
        self.ai.validate()?;
        self.limits.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PROMPT_FORGE__TELEGRAM__BOT_TOKEN", "123:ABC");
        env::set_var("PROMPT_FORGE__AI__API_KEY", "sk-xxx");
    }

    fn clear_env() {
        env::remove_var("PROMPT_FORGE__TELEGRAM__BOT_TOKEN");
        env::remove_var("PROMPT_FORGE__AI__API_KEY");
        env::remove_var("PROMPT_FORGE__AI__MODEL");
        env::remove_var("PROMPT_FORGE__AI__MAX_ATTEMPTS");
        env::remove_var("PROMPT_FORGE__LIMITS__REQUESTS_PER_MINUTE");
        env::remove_var(LEGACY_BOT_TOKEN_VAR);
        env::remove_var(LEGACY_API_KEY_VAR);
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.telegram.bot_token.unwrap().expose_secret(),
            "123:ABC"
        );
        assert_eq!(config.ai.api_key.unwrap().expose_secret(), "sk-xxx");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.ai.model, "deepseek-chat");
        assert_eq!(config.ai.max_attempts, 3);
        assert_eq!(config.limits, LimitsConfig::default());
    }

    #[test]
    fn test_custom_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PROMPT_FORGE__AI__MODEL", "gpt-4o-mini");
        env::set_var("PROMPT_FORGE__AI__MAX_ATTEMPTS", "5");
        env::set_var("PROMPT_FORGE__LIMITS__REQUESTS_PER_MINUTE", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.ai.max_attempts, 5);
        assert_eq!(config.limits.requests_per_minute, 10);
    }

    #[test]
    fn test_legacy_variables_are_fallbacks() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(LEGACY_BOT_TOKEN_VAR, "legacy-token");
        env::set_var(LEGACY_API_KEY_VAR, "legacy-key");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.telegram.bot_token.unwrap().expose_secret(),
            "legacy-token"
        );
        assert_eq!(config.ai.api_key.unwrap().expose_secret(), "legacy-key");
    }

    #[test]
    fn test_prefixed_variables_win_over_legacy() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(LEGACY_API_KEY_VAR, "legacy-key");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().ai.api_key.unwrap().expose_secret(), "sk-xxx");
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired(
                "PROMPT_FORGE__TELEGRAM__BOT_TOKEN"
            ))
        );
    }
}
