//! Resilient Completion Client - timeout and bounded retry around a provider.
//!
//! Every attempt is bounded by its own timeout. Any failure, including an
//! empty or whitespace-only completion, is retried after `2^attempt`
//! seconds (attempt counted from zero) until the attempt budget is spent.
//! There is no delay after the final attempt; the last error is returned.
//!
//! # Example
//!
//! ```ignore
//! let client = ResilientCompletionClient::new(Arc::new(provider), RetryPolicy::default());
//! let prompt = client.generate(instruction, description, metadata).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::ports::{AIError, CompletionProvider, CompletionRequest, RequestMetadata};

/// Attempt budget and per-attempt timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one.
    pub max_attempts: u32,
    /// Upper bound for a single attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempt_timeout,
        }
    }

    /// Delay after the failed attempt with the given zero-based index.
    pub fn backoff(attempt: u32) -> Duration {
        Duration::from_secs(1u64 << attempt.min(16))
    }
}

/// Completion client with timeout and retry.
///
/// Holds no per-call state; concurrent calls are independent.
#[derive(Clone)]
pub struct ResilientCompletionClient {
    provider: Arc<dyn CompletionProvider>,
    policy: RetryPolicy,
}

impl ResilientCompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Generates text for a system instruction and user message.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error once all attempts failed.
    /// `AIError::EmptyResponse` when the provider answered with blank text.
    pub async fn generate(
        &self,
        system_instruction: &str,
        user_message: &str,
        metadata: RequestMetadata,
    ) -> Result<String, AIError> {
        let request = CompletionRequest::new(system_instruction, user_message, metadata);
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = AIError::network("No attempts made");

        for attempt in 0..max_attempts {
            match self.attempt(request.clone()).await {
                Ok(content) => {
                    tracing::debug!(
                        trace_id = %request.metadata.trace_id,
                        attempt = attempt + 1,
                        "Completion succeeded"
                    );
                    return Ok(content);
                }
                Err(err) => {
                    tracing::warn!(
                        trace_id = %request.metadata.trace_id,
                        user_id = %request.metadata.user_id,
                        attempt = attempt + 1,
                        max_attempts,
                        error = %err,
                        "Completion attempt failed"
                    );
                    last_error = err;
                }
            }

            if attempt + 1 < max_attempts {
                sleep(RetryPolicy::backoff(attempt)).await;
            }
        }

        tracing::error!(
            trace_id = %request.metadata.trace_id,
            user_id = %request.metadata.user_id,
            error = %last_error,
            "Completion failed after {} attempts",
            max_attempts
        );
        Err(last_error)
    }

    async fn attempt(&self, request: CompletionRequest) -> Result<String, AIError> {
        let response = timeout(self.policy.attempt_timeout, self.provider.complete(request))
            .await
            .map_err(|_| AIError::timeout(self.policy.attempt_timeout.as_secs()))??;
        tracing::debug!(model = %response.model, "Completion received");

        let content = response.content.trim();
        if content.is_empty() {
            return Err(AIError::EmptyResponse);
        }
        Ok(content.to_string())
    }
}
