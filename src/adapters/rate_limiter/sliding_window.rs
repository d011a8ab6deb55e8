//! Sliding-window rate limiter.
//!
//! Keeps the admission instants of each user within the trailing window.
//! Instants come from `tokio::time::Instant`, which is monotonic and can be
//! paused and advanced in tests.
//!
//! Entries for users who stopped talking are never evicted; memory grows
//! with the number of distinct users over the process lifetime.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::foundation::UserId;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// In-memory sliding-window rate limiter.
#[derive(Debug, Clone)]
pub struct SlidingWindowRateLimiter {
    config: RateLimitConfig,
    /// Per-user admission instants, oldest first.
    windows: Arc<RwLock<HashMap<UserId, VecDeque<Instant>>>>,
}

impl SlidingWindowRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drops instants older than the window.
    fn purge(window: &mut VecDeque<Instant>, now: Instant, config: &RateLimitConfig) {
        while let Some(oldest) = window.front() {
            if now.duration_since(*oldest) >= config.window() {
                window.pop_front();
            } else {
                break;
            }
        }
    }

    fn status_for(&self, used: usize) -> RateLimitStatus {
        let used = u32::try_from(used).unwrap_or(u32::MAX);
        RateLimitStatus {
            limit: self.config.requests_per_window,
            remaining: self.config.requests_per_window.saturating_sub(used),
            window_secs: self.config.window_secs,
        }
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowRateLimiter {
    async fn check(&self, user_id: &UserId) -> Result<RateLimitResult, RateLimitError> {
        let now = Instant::now();
        let mut windows = self.windows.write().await;
        let window = windows.entry(*user_id).or_default();

        Self::purge(window, now, &self.config);

        if window.len() >= self.config.requests_per_window as usize {
            let retry_after = window
                .front()
                .map(|oldest| self.config.window().saturating_sub(now.duration_since(*oldest)))
                .unwrap_or_default();

            tracing::info!(user_id = %user_id, "Rate limit exceeded");
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit: self.config.requests_per_window,
                retry_after_secs: retry_after.as_secs().max(1),
            }));
        }

        window.push_back(now);
        Ok(RateLimitResult::Allowed(self.status_for(window.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::advance;

    fn user(id: u64) -> UserId {
        UserId::new(id)
    }

    // ─── Basic Functionality Tests ───────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn five_within_a_second_then_sixth_denied() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::default());

        for i in 0..5 {
            let result = limiter.check(&user(1)).await.unwrap();
            assert!(result.is_allowed(), "Request {} should be allowed", i + 1);
            advance(Duration::from_millis(100)).await;
        }

        let result = limiter.check(&user(1)).await.unwrap();
        assert!(result.is_denied());
        if let RateLimitResult::Denied(denied) = result {
            assert_eq!(denied.limit, 5);
            assert!(denied.retry_after_secs >= 59);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn admits_again_after_window_elapses() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::default());
        for _ in 0..5 {
            limiter.check(&user(1)).await.unwrap();
        }
        assert!(limiter.check(&user(1)).await.unwrap().is_denied());

        advance(Duration::from_secs(61)).await;

        assert!(limiter.check(&user(1)).await.unwrap().is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn window_slides_rather_than_resets() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::per_minute(2));

        limiter.check(&user(1)).await.unwrap();
        advance(Duration::from_secs(40)).await;
        limiter.check(&user(1)).await.unwrap();

        // First admission is 50s old: still inside the window
        advance(Duration::from_secs(10)).await;
        assert!(limiter.check(&user(1)).await.unwrap().is_denied());

        // First admission left the window, second has not
        advance(Duration::from_secs(11)).await;
        assert!(limiter.check(&user(1)).await.unwrap().is_allowed());
        assert!(limiter.check(&user(1)).await.unwrap().is_denied());
    }

    #[tokio::test(start_paused = true)]
    async fn denied_attempts_are_not_recorded() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::per_minute(1));

        limiter.check(&user(1)).await.unwrap();
        for _ in 0..10 {
            advance(Duration::from_secs(5)).await;
            assert!(limiter.check(&user(1)).await.unwrap().is_denied());
        }

        // 60s after the only admission
        advance(Duration::from_secs(10)).await;
        assert!(limiter.check(&user(1)).await.unwrap().is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn allowed_reports_remaining_quota() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::default());

        for expected in (0..5).rev() {
            match limiter.check(&user(3)).await.unwrap() {
                RateLimitResult::Allowed(status) => {
                    assert_eq!(status.limit, 5);
                    assert_eq!(status.remaining, expected);
                    assert_eq!(status.window_secs, 60);
                }
                RateLimitResult::Denied(_) => panic!("request should be allowed"),
            }
        }
    }

    // ─── Different Users Are Independent ──────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn users_have_independent_windows() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::per_minute(2));

        for _ in 0..2 {
            limiter.check(&user(1)).await.unwrap();
        }
        assert!(limiter.check(&user(1)).await.unwrap().is_denied());
        assert!(limiter.check(&user(2)).await.unwrap().is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_checks_never_over_admit() {
        let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::default());

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.check(&UserId::new(5)).await.unwrap() })
            })
            .collect();

        let mut allowed = 0;
        for handle in handles {
            if handle.await.unwrap().is_allowed() {
                allowed += 1;
            }
        }
        assert_eq!(allowed, 5);
    }
}
