//! Prompt-crafting conversation domain.
//!
//! Categories, the per-user session, the conversation state machine and the
//! message texts it emits.

mod category;
mod chunking;
mod effect;
mod event;
mod machine;
mod session;
mod state;
pub mod templates;

pub use category::Category;
pub use chunking::split_into_chunks;
pub use effect::{
    Decision, Effect, FailureCategory, GenerationKind, GenerationOutcome, GenerationPlan,
    Keyboard, OutgoingMessage, TextFormat, Transition,
};
pub use event::{Event, CALLBACK_APPROVE, CALLBACK_BACK, CALLBACK_HELP, CALLBACK_REFINE};
pub use machine::{failure_message, ConversationMachine, DEFAULT_MAX_MESSAGE_LENGTH};
pub use session::{
    truncate_with_ellipsis, HistoryEntry, Session, DEFAULT_HISTORY_CAPACITY, ELLIPSIS,
    HISTORY_TEXT_LIMIT,
};
pub use state::ConversationState;
