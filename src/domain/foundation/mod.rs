//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types and the state machine
//! trait that form the vocabulary of the Prompt Forge domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ChatId, TraceId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
