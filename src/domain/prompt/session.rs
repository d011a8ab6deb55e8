//! Per-user session entity.
//!
//! Holds the conversation state, the data the state machine needs between
//! events, and a bounded history of generated prompts.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::domain::foundation::{Timestamp, UserId};

use super::{Category, ConversationState};

/// Number of history entries kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Stored history text is cut to this many chars.
pub const HISTORY_TEXT_LIMIT: usize = 200;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "…";

/// A generated prompt remembered for `/history`. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub category: Category,
    /// Prompt text, truncated to [`HISTORY_TEXT_LIMIT`] chars plus [`ELLIPSIS`].
    pub text: String,
    /// Shown next to the entry in `/history`.
    pub created_at: Timestamp,
}

impl HistoryEntry {
    /// Creates an entry from a full generated prompt.
    pub fn new(category: Category, prompt: &str) -> Self {
        Self {
            category,
            text: truncate_with_ellipsis(prompt, HISTORY_TEXT_LIMIT),
            created_at: Timestamp::now(),
        }
    }
}

/// Truncates `text` to `limit` chars, appending [`ELLIPSIS`] when cut.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// In-memory conversation session for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub state: ConversationState,
    /// Category chosen from the main menu.
    pub category: Option<Category>,
    /// Most recent accepted prompt (generated or refined).
    pub last_prompt: Option<String>,
    pub last_category: Option<Category>,
    pub original_description: Option<String>,
    history: VecDeque<HistoryEntry>,
    history_capacity: usize,
}

impl Session {
    /// Creates a fresh session in `MainMenu` with the default history capacity.
    pub fn new(user_id: UserId) -> Self {
        Self::with_history_capacity(user_id, DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a fresh session keeping at most `capacity` history entries.
    pub fn with_history_capacity(user_id: UserId, capacity: usize) -> Self {
        Self {
            user_id,
            state: ConversationState::MainMenu,
            category: None,
            last_prompt: None,
            last_category: None,
            original_description: None,
            history: VecDeque::with_capacity(capacity),
            history_capacity: capacity,
        }
    }

    /// Appends a history entry, evicting the oldest beyond capacity.
    pub fn record_generation(&mut self, category: Category, prompt: &str) {
        self.history.push_back(HistoryEntry::new(category, prompt));
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }
    }

    /// Stores the outcome of a first-time generation.
    pub fn accept_prompt(&mut self, category: Category, prompt: String, description: String) {
        self.last_prompt = Some(prompt);
        self.last_category = Some(category);
        self.original_description = Some(description);
    }

    /// History entries, oldest first.
    pub fn history(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }
}
