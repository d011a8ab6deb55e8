//! Recording Chat Transport for testing.
//!
//! Captures every outbound operation in order instead of talking to a chat
//! platform. Individual operation kinds can be made to fail.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::foundation::ChatId;
use crate::domain::prompt::{OutgoingMessage, TextFormat};
use crate::ports::{ChatTransport, SentMessage, TransportError};

/// One captured transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOp {
    Sent {
        chat_id: ChatId,
        message: OutgoingMessage,
        handle: SentMessage,
    },
    Deleted {
        chat_id: ChatId,
        handle: SentMessage,
    },
    Edited {
        chat_id: ChatId,
        handle: SentMessage,
        text: String,
        format: TextFormat,
    },
}

/// In-memory transport that records operations.
///
/// Clones share the log and the failure switches.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    ops: Arc<Mutex<Vec<TransportOp>>>,
    next_id: Arc<AtomicI32>,
    fail_sends: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
    fail_edits: Arc<AtomicBool>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent delete fail.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent edit fail.
    pub fn fail_edits(&self, fail: bool) {
        self.fail_edits.store(fail, Ordering::SeqCst);
    }

    /// All recorded operations, oldest first.
    pub fn operations(&self) -> Vec<TransportOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Messages delivered by successful sends, oldest first.
    pub fn sent_messages(&self) -> Vec<OutgoingMessage> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter_map(|op| match op {
                TransportOp::Sent { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Texts of successfully sent messages, oldest first.
    pub fn sent_texts(&self) -> Vec<String> {
        self.sent_messages().into_iter().map(|m| m.text).collect()
    }

    /// Most recently sent message.
    pub fn last_sent(&self) -> Option<OutgoingMessage> {
        self.sent_messages().pop()
    }

    /// Forgets recorded operations.
    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    fn record(&self, op: TransportOp) {
        self.ops.lock().unwrap().push(op);
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<SentMessage, TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::send_failed(chat_id, "send disabled"));
        }

        let handle = SentMessage::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.record(TransportOp::Sent {
            chat_id,
            message,
            handle,
        });
        Ok(handle)
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message: SentMessage,
    ) -> Result<(), TransportError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(TransportError::delete_failed(message, "delete disabled"));
        }

        self.record(TransportOp::Deleted {
            chat_id,
            handle: message,
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message: SentMessage,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TransportError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(TransportError::edit_failed(message, "edit disabled"));
        }

        self.record(TransportOp::Edited {
            chat_id,
            handle: message,
            text: text.to_string(),
            format,
        });
        Ok(())
    }
}
