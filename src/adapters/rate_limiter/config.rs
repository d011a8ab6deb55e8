//! Rate limit configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sliding-window limits applied to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window.
    pub requests_per_window: u32,
    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 5,
            window_secs: 60,
        }
    }
}

impl RateLimitConfig {
    /// Limit of `requests` per trailing minute.
    pub fn per_minute(requests: u32) -> Self {
        Self {
            requests_per_window: requests,
            ..Self::default()
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}
