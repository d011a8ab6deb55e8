//! Completion Provider Port - Interface for chat-completion APIs.
//!
//! This port abstracts a single call to an external text-completion service,
//! letting the conversation flow generate prompts without coupling to a
//! specific vendor.
//!
//! # Design
//!
//! - One attempt per call; retry and timeout live in the resilient client
//! - Fixed two-message exchange: system instruction plus user message
//! - Structured errors with one classifier for user-facing messages
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl CompletionProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse::new(request.user_message, "echo"))
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TraceId, UserId};
use crate::domain::prompt::FailureCategory;

/// Port for chat-completion providers.
///
/// Implementations connect to an external service and translate between the
/// provider-specific API and these types.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Performs a single completion attempt.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Behavioral directive defining the generation task.
    pub system_instruction: String,
    /// The user's text.
    pub user_message: String,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates a new completion request.
    pub fn new(
        system_instruction: impl Into<String>,
        user_message: impl Into<String>,
        metadata: RequestMetadata,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_message: user_message.into(),
            metadata,
        }
    }
}

/// Role of a message sender in the wire exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// User on whose behalf the request is made.
    pub user_id: UserId,
    /// Trace ID shared by every attempt of one generation.
    pub trace_id: TraceId,
}

impl RequestMetadata {
    /// Creates metadata with a fresh trace id.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            trace_id: TraceId::new(),
        }
    }
}

/// Response from a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Completion errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Throttled by the provider.
    #[error("rate limited by provider (429)")]
    RateLimited,

    /// Account quota or balance exhausted.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// API key rejected.
    #[error("authentication failed (401): check api_key")]
    AuthenticationFailed,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The call succeeded but produced no text.
    #[error("empty response from completion API")]
    EmptyResponse,

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AIError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Classifies this error for the user-facing message.
    ///
    /// Structured variants map directly. Free-text variants fall back to
    /// substring matching on their message.
    pub fn failure_category(&self) -> FailureCategory {
        match self {
            AIError::Timeout { .. } | AIError::Network(_) => FailureCategory::NetworkOrTimeout,
            AIError::AuthenticationFailed | AIError::QuotaExceeded(_) | AIError::RateLimited => {
                FailureCategory::AuthOrQuota
            }
            AIError::EmptyResponse => FailureCategory::Unknown,
            AIError::Unavailable { message }
            | AIError::Parse(message)
            | AIError::InvalidRequest(message) => classify_message(message),
        }
    }
}

fn classify_message(message: &str) -> FailureCategory {
    let lower = message.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") || lower.contains("connection") {
        FailureCategory::NetworkOrTimeout
    } else if lower.contains("api_key")
        || lower.contains("api key")
        || lower.contains("401")
        || lower.contains("429")
        || lower.contains("quota")
    {
        FailureCategory::AuthOrQuota
    } else {
        FailureCategory::Unknown
    }
}
