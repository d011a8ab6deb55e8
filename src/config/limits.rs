//! Per-user limits and platform constraints

use serde::Deserialize;

use super::error::ValidationError;

/// Limits configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Generations admitted per user per trailing minute
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,

    /// History entries kept per user
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Maximum characters in one outgoing message
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

impl LimitsConfig {
    /// Validate limits
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_minute == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        if self.history_capacity == 0 {
            return Err(ValidationError::InvalidHistoryCapacity);
        }
        if self.max_message_length == 0 {
            return Err(ValidationError::InvalidMessageLength);
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
            history_capacity: default_history_capacity(),
            max_message_length: default_max_message_length(),
        }
    }
}

fn default_requests_per_minute() -> u32 {
    5
}

fn default_history_capacity() -> usize {
    5
}

fn default_max_message_length() -> usize {
    4096
}
