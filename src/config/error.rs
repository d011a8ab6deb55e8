//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid completion timeout")]
    InvalidTimeout,

    #[error("Completion attempts must be at least 1")]
    InvalidAttempts,

    #[error("Requests per minute must be at least 1")]
    InvalidRateLimit,

    #[error("History capacity must be at least 1")]
    InvalidHistoryCapacity,

    #[error("Max message length must be at least 1")]
    InvalidMessageLength,

    #[error("Invalid completion API base URL")]
    InvalidBaseUrl,
}
