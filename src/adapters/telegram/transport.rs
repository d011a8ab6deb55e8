//! Telegram implementation of the ChatTransport port.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use teloxide::RequestError;

use crate::domain::foundation::ChatId;
use crate::domain::prompt::{OutgoingMessage, TextFormat};
use crate::ports::{ChatTransport, SentMessage, TransportError};

use super::keyboard::inline_keyboard;

/// Sends messages through the Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn send(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
        format: TextFormat,
    ) -> Result<Message, RequestError> {
        let mut request = self
            .bot
            .send_message(tg_chat(chat_id), message.text.clone());
        if format == TextFormat::Markdown {
            request = request.parse_mode(legacy_markdown());
        }
        if let Some(keyboard) = message.keyboard {
            request = request.reply_markup(inline_keyboard(keyboard));
        }
        request.await
    }
}

/// Templates use the legacy Markdown dialect (`*bold*`, `_italic_`), which
/// teloxide marks deprecated in favour of MarkdownV2.
#[allow(deprecated)]
fn legacy_markdown() -> ParseMode {
    ParseMode::Markdown
}

fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
    teloxide::types::ChatId(chat_id.as_i64())
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<SentMessage, TransportError> {
        let sent = match self.send(chat_id, &message, message.format).await {
            Ok(sent) => sent,
            // Markup the API rejects is resent verbatim
            Err(RequestError::Api(err)) if message.format == TextFormat::Markdown => {
                tracing::debug!(chat_id = %chat_id, error = %err, "Markdown rejected, resending as plain text");
                self.send(chat_id, &message, TextFormat::Plain)
                    .await
                    .map_err(|e| TransportError::send_failed(chat_id, e.to_string()))?
            }
            Err(err) => return Err(TransportError::send_failed(chat_id, err.to_string())),
        };

        Ok(SentMessage::new(sent.id.0))
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message: SentMessage,
    ) -> Result<(), TransportError> {
        self.bot
            .delete_message(tg_chat(chat_id), MessageId(message.id()))
            .await
            .map(|_| ())
            .map_err(|e| TransportError::delete_failed(message, e.to_string()))
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message: SentMessage,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TransportError> {
        let mut request = self
            .bot
            .edit_message_text(tg_chat(chat_id), MessageId(message.id()), text);
        if format == TextFormat::Markdown {
            request = request.parse_mode(legacy_markdown());
        }
        request
            .await
            .map(|_| ())
            .map_err(|e| TransportError::edit_failed(message, e.to_string()))
    }
}
