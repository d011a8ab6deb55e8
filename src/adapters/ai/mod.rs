//! Completion Provider Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAICompatibleProvider` - any OpenAI-style chat-completions API (DeepSeek by default)
//! - `MockCompletionProvider` - Configurable mock for testing
//! - `ResilientCompletionClient` - timeout and bounded retry around any provider

mod mock_provider;
mod openai_provider;
mod resilient_client;

pub use mock_provider::{MockCompletionProvider, MockResponse};
pub use openai_provider::{OpenAICompatibleProvider, OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use resilient_client::{ResilientCompletionClient, RetryPolicy};
