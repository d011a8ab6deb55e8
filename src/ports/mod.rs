//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionProvider` - one call to a chat-completion API
//! - `RateLimiter` - per-user admission control
//! - `ChatTransport` - outbound messages to the chat platform
//! - `SessionStore` - per-user conversation sessions

mod chat_transport;
mod completion_provider;
mod rate_limiter;
mod session_store;

pub use chat_transport::{ChatTransport, SentMessage, TransportError};
pub use completion_provider::{
    AIError, CompletionProvider, CompletionRequest, CompletionResponse, MessageRole,
    RequestMetadata,
};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitResult, RateLimitStatus, RateLimiter,
};
pub use session_store::{SessionHandle, SessionStore};
