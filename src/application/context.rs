//! Per-process application context.
//!
//! Owns every shared collaborator of the conversation flow. Built once at
//! startup and shared through `Arc`; tests build a fresh one per case.

use std::sync::Arc;

use crate::adapters::ai::ResilientCompletionClient;
use crate::domain::prompt::ConversationMachine;
use crate::ports::{ChatTransport, RateLimiter, SessionStore};

/// Shared collaborators of the conversation controller.
#[derive(Clone)]
pub struct AppContext {
    pub sessions: Arc<dyn SessionStore>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub completion: ResilientCompletionClient,
    pub transport: Arc<dyn ChatTransport>,
    pub machine: ConversationMachine,
}

impl AppContext {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        rate_limiter: Arc<dyn RateLimiter>,
        completion: ResilientCompletionClient,
        transport: Arc<dyn ChatTransport>,
        machine: ConversationMachine,
    ) -> Self {
        Self {
            sessions,
            rate_limiter,
            completion,
            transport,
            machine,
        }
    }
}
