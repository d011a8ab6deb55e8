//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine trait)
//! - `prompt` - Categories, conversation states, sessions and the conversation machine

pub mod foundation;
pub mod prompt;
