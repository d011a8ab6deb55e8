//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - chat-completion providers and the resilient client
//! - `chat` - in-memory chat transport
//! - `rate_limiter` - per-user sliding window
//! - `storage` - in-memory session store
//! - `telegram` - teloxide transport and dispatcher

pub mod ai;
pub mod chat;
pub mod rate_limiter;
pub mod storage;
pub mod telegram;
