//! Rate limiter adapters.
//!
//! ## Available Adapters
//!
//! - `SlidingWindowRateLimiter` - In-memory per-user sliding window
//!
//! ## Usage
//!
//! ```ignore
//! use prompt_forge::adapters::rate_limiter::{RateLimitConfig, SlidingWindowRateLimiter};
//!
//! let limiter = SlidingWindowRateLimiter::new(RateLimitConfig::per_minute(5));
//! ```

mod config;
mod sliding_window;

pub use config::RateLimitConfig;
pub use sliding_window::SlidingWindowRateLimiter;
