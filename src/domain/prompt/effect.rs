//! Outputs of the state machine.
//!
//! The machine never talks to the transport directly. It returns effects
//! that the controller executes in order.

use super::{Category, ConversationState};

/// How the transport should interpret message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Verbatim; used for generated prompts, which may contain markup characters.
    #[default]
    Plain,
    Markdown,
}

/// Inline keyboard attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    /// The four categories plus Help.
    Categories,
    /// A single Back button.
    BackToMenu,
    ApproveOrRefine,
}

/// A message to deliver to the user's chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub format: TextFormat,
}

impl OutgoingMessage {
    /// Creates a plain-text message without keyboard.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            format: TextFormat::Plain,
        }
    }

    /// Creates a Markdown message without keyboard.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            format: TextFormat::Markdown,
        }
    }

    /// Attaches a keyboard.
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// A side effect requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver a message; failure aborts the current event.
    Send(OutgoingMessage),
    /// Delete the "generating…" status message. Fire-and-forget.
    ClearStatus,
    /// Edit the status message into this text, sending it as a new message
    /// when editing fails.
    ReplaceStatus(OutgoingMessage),
}

/// The result of handling an event: the next state and what to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ConversationState,
    pub effects: Vec<Effect>,
}

impl Transition {
    /// Creates a transition with the given effects.
    pub fn new(next: ConversationState, effects: Vec<Effect>) -> Self {
        Self { next, effects }
    }

    /// Iterates over the messages this transition sends, status replacements included.
    pub fn messages(&self) -> impl Iterator<Item = &OutgoingMessage> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Send(message) | Effect::ReplaceStatus(message) => Some(message),
            Effect::ClearStatus => None,
        })
    }
}

/// What kind of generation the machine asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationKind {
    /// First prompt for a description.
    Initial {
        category: Category,
        description: String,
    },
    /// Rewrite of the current prompt.
    Refinement { requested_changes: String },
}

/// A completion call the machine needs before it can pick the next state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub kind: GenerationKind,
    pub system_instruction: String,
    pub user_message: String,
}

/// User-facing classification of a failed completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    NetworkOrTimeout,
    AuthOrQuota,
    Unknown,
}

/// What happened to a [`GenerationPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Admission denied; no call was made.
    RateLimited,
    Succeeded(String),
    Failed(FailureCategory),
}

/// The machine's answer to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Transition(Transition),
    /// Admission and a completion call are needed; feed the outcome back
    /// through `ConversationMachine::on_generation`.
    Generate(GenerationPlan),
}
