//! Conversation state machine.
//!
//! Defines the per-user conversation states and valid transitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a user currently is in the prompt-crafting conversation.
///
/// The machine is cyclic: there is no terminal state, every state can
/// eventually return to `MainMenu`.
/// - `MainMenu`: waiting for a category choice
/// - `AwaitingDescription`: category chosen, waiting for the user's idea
/// - `PromptShown`: a prompt was delivered, waiting for Approve or Refine
/// - `AwaitingRefinement`: Refine chosen, waiting for the requested changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// Initial state on first contact.
    #[default]
    MainMenu,

    AwaitingDescription,

    PromptShown,

    AwaitingRefinement,
}

impl ConversationState {
    /// Returns all states.
    pub fn all() -> &'static [ConversationState] {
        &[
            ConversationState::MainMenu,
            ConversationState::AwaitingDescription,
            ConversationState::PromptShown,
            ConversationState::AwaitingRefinement,
        ]
    }
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationState::*;
        // A prompt can only be shown as the result of a generation, which
        // requires a description or refinement to have been requested first.
        !matches!((self, target), (MainMenu, PromptShown))
    }
}
