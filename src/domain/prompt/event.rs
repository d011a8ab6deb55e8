//! Inbound conversation events.
//!
//! Every platform update is mapped to exactly one [`Event`] before it reaches
//! the state machine.

use super::Category;

/// Payload of the Help button.
pub const CALLBACK_HELP: &str = "help";
/// Payload of the Back button.
pub const CALLBACK_BACK: &str = "back";
/// Payload of the Approve button.
pub const CALLBACK_APPROVE: &str = "approve";
/// Payload of the Refine button.
pub const CALLBACK_REFINE: &str = "refine";

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start`
    Start,
    CategorySelected(Category),
    HelpRequested,
    /// `/history`
    HistoryRequested,
    BackRequested,
    ApproveRequested,
    RefineRequested,
    TextReceived(String),
    /// `/cancel`
    CancelRequested,
    /// A button or command this bot does not know, e.g. from a stale keyboard.
    Unrecognized,
}

impl Event {
    /// Maps a button payload to an event.
    pub fn from_callback(data: &str) -> Self {
        match data {
            CALLBACK_HELP => Event::HelpRequested,
            CALLBACK_BACK => Event::BackRequested,
            CALLBACK_APPROVE => Event::ApproveRequested,
            CALLBACK_REFINE => Event::RefineRequested,
            other => other
                .parse::<Category>()
                .map(Event::CategorySelected)
                .unwrap_or(Event::Unrecognized),
        }
    }

    /// Maps an incoming text message to an event.
    ///
    /// Text is a command only when it starts with `/` followed by a bare
    /// command word, optionally suffixed with `@botname`. Anything else,
    /// such as `/etc/hosts parser`, is ordinary text.
    pub fn from_text(text: &str) -> Self {
        let Some(name) = command_name(text) else {
            return Event::TextReceived(text.to_string());
        };

        match name {
            "start" => Event::Start,
            "help" => Event::HelpRequested,
            "cancel" => Event::CancelRequested,
            "history" => Event::HistoryRequested,
            _ => Event::Unrecognized,
        }
    }

    /// Short name for logs; never includes user text.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::CategorySelected(_) => "category_selected",
            Event::HelpRequested => "help",
            Event::HistoryRequested => "history",
            Event::BackRequested => "back",
            Event::ApproveRequested => "approve",
            Event::RefineRequested => "refine",
            Event::TextReceived(_) => "text",
            Event::CancelRequested => "cancel",
            Event::Unrecognized => "unrecognized",
        }
    }
}

/// Extracts `name` from `/name` or `/name@bot`, ignoring arguments.
fn command_name(text: &str) -> Option<&str> {
    let token = text.trim_start().strip_prefix('/')?.split(char::is_whitespace).next()?;
    let (name, bot) = match token.split_once('@') {
        Some((name, bot)) => (name, Some(bot)),
        None => (token, None),
    };

    let is_word = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    (is_word(name) && bot.map_or(true, is_word)).then_some(name)
}
