//! Rate limiting port for per-user admission control.
//!
//! Each user may start a bounded number of completions within a trailing
//! time window. Implementations hold the per-user window state.

use async_trait::async_trait;

use crate::domain::foundation::UserId;

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe; distinct users never affect each
/// other's quota.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Checks whether the user may start a request, recording it if so.
    ///
    /// A denied attempt is not recorded.
    async fn check(&self, user_id: &UserId) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    /// Returns true if the request was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    /// Returns true if the request was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Rate limit status after an admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Window duration in seconds.
    pub window_secs: u64,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDenied {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Seconds until the oldest recorded request leaves the window.
    pub retry_after_secs: u64,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}
