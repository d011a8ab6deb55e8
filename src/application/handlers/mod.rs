//! Command handlers.

mod handle_event;

pub use handle_event::{ConversationController, ConversationError, IncomingEvent};
