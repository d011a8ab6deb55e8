//! Chat Transport Port - Interface for delivering messages to users.
//!
//! The conversation flow only needs to send text with an optional keyboard,
//! delete a message, and edit a message in place. Keyboard rendering and
//! markup dialects are the adapter's concern.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;
use crate::domain::prompt::{OutgoingMessage, TextFormat};

/// Errors that can occur while talking to the chat platform
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to send message to chat {chat_id}: {reason}")]
    SendFailed { chat_id: ChatId, reason: String },

    #[error("Failed to delete message {message_id}: {reason}")]
    DeleteFailed { message_id: i32, reason: String },

    #[error("Failed to edit message {message_id}: {reason}")]
    EditFailed { message_id: i32, reason: String },
}

impl TransportError {
    pub fn send_failed(chat_id: ChatId, reason: impl Into<String>) -> Self {
        Self::SendFailed {
            chat_id,
            reason: reason.into(),
        }
    }

    pub fn delete_failed(message: SentMessage, reason: impl Into<String>) -> Self {
        Self::DeleteFailed {
            message_id: message.id(),
            reason: reason.into(),
        }
    }

    pub fn edit_failed(message: SentMessage, reason: impl Into<String>) -> Self {
        Self::EditFailed {
            message_id: message.id(),
            reason: reason.into(),
        }
    }
}

/// Handle to a message the transport delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentMessage(i32);

impl SentMessage {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i32 {
        self.0
    }
}

/// Port for the chat platform's outbound operations
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a message, attaching its keyboard if any
    ///
    /// # Errors
    /// Returns `TransportError::SendFailed` if the platform rejects it
    async fn send_text(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<SentMessage, TransportError>;

    /// Delete a previously sent message
    async fn delete_message(
        &self,
        chat_id: ChatId,
        message: SentMessage,
    ) -> Result<(), TransportError>;

    /// Replace the text of a previously sent message
    async fn edit_message(
        &self,
        chat_id: ChatId,
        message: SentMessage,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TransportError>;
}
