//! Application layer - the conversation controller and its context.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod context;
pub mod handlers;

pub use context::AppContext;
pub use handlers::{ConversationController, ConversationError, IncomingEvent};
