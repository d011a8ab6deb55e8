//! Mock Completion Provider for testing.
//!
//! Provides a configurable mock implementation of the CompletionProvider
//! port, allowing tests to run without calling a real API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - A fallback used once the queue is empty
//! - Simulated delays for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_error(AIError::network("reset"))
//!     .with_response("Write a REST API…");
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, CompletionProvider, CompletionRequest, CompletionResponse};

const MOCK_MODEL: &str = "mock-model-1";

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion with this content.
    Success(String),
    /// Return an error.
    Error(AIError),
}

/// Mock completion provider for testing.
///
/// Clones share the queue and the call log.
#[derive(Debug, Clone)]
pub struct MockCompletionProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Returned when the queue is empty.
    fallback: MockResponse,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionProvider {
    /// Creates a new mock provider answering "Mock response" by default.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: MockResponse::Success("Mock response".to_string()),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a provider whose every call fails with `error`.
    pub fn failing(error: AIError) -> Self {
        Self::new().with_fallback(MockResponse::Error(error))
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets the response used once the queue is empty.
    pub fn with_fallback(mut self, response: MockResponse) -> Self {
        self.fallback = response;
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a response on a provider that is already shared.
    pub fn push(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Gets the next response or the fallback.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(CompletionResponse::new(content, MOCK_MODEL)),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RequestMetadata;

    fn request() -> CompletionRequest {
        CompletionRequest::new("system", "user", RequestMetadata::new(UserId::new(1)))
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let provider = MockCompletionProvider::new()
            .with_response("first")
            .with_error(AIError::RateLimited)
            .with_response("second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(request()).await.unwrap_err(), AIError::RateLimited);
        assert_eq!(provider.complete(request()).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn falls_back_when_queue_is_empty() {
        let provider = MockCompletionProvider::new();
        assert_eq!(provider.complete(request()).await.unwrap().content, "Mock response");

        let failing = MockCompletionProvider::failing(AIError::AuthenticationFailed);
        for _ in 0..3 {
            assert_eq!(
                failing.complete(request()).await.unwrap_err(),
                AIError::AuthenticationFailed
            );
        }
    }

    #[tokio::test]
    async fn records_calls_across_clones() {
        let provider = MockCompletionProvider::new();
        let clone = provider.clone();

        clone.complete(request()).await.unwrap();
        clone.complete(request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.get_calls()[0].user_message, "user");
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied() {
        let provider = MockCompletionProvider::new().with_delay(Duration::from_secs(5));
        let start = tokio::time::Instant::now();

        provider.complete(request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
