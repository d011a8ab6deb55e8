//! Long-polling dispatcher mapping Telegram updates to conversation events.
//!
//! Updates from one chat are handled sequentially by the dispatcher; the
//! controller additionally serializes each user's events on their session.

use std::sync::Arc;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::Update,
};

use crate::application::{ConversationController, IncomingEvent};
use crate::domain::foundation::{ChatId, UserId};
use crate::domain::prompt::Event;

/// Runs the bot until Ctrl-C.
pub async fn run_dispatcher(bot: Bot, controller: Arc<ConversationController>) {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    tracing::info!("Starting dispatcher with long polling");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![controller])
        .default_handler(|upd| async move {
            tracing::debug!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Dispatcher stopped");
}

/// Message handler endpoint: commands and free text.
async fn message_handler(
    msg: Message,
    controller: Arc<ConversationController>,
) -> ResponseResult<()> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };

    let incoming = IncomingEvent::new(
        UserId::new(user.id.0),
        ChatId::new(msg.chat.id.0),
        Event::from_text(text),
    );
    dispatch(&controller, incoming).await;
    Ok(())
}

/// Callback query handler for inline keyboard buttons.
async fn callback_handler(
    bot: Bot,
    query: CallbackQuery,
    controller: Arc<ConversationController>,
) -> ResponseResult<()> {
    if let Err(err) = bot.answer_callback_query(&query.id).await {
        tracing::debug!(error = %err, "Failed to answer callback query");
    }

    let Some(chat_id) = query.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    let event = query
        .data
        .as_deref()
        .map(Event::from_callback)
        .unwrap_or(Event::Unrecognized);

    let incoming = IncomingEvent::new(UserId::new(query.from.id.0), ChatId::new(chat_id.0), event);
    dispatch(&controller, incoming).await;
    Ok(())
}

async fn dispatch(controller: &ConversationController, incoming: IncomingEvent) {
    let user_id = incoming.user_id;
    if let Err(err) = controller.handle(incoming).await {
        tracing::error!(user_id = %user_id, error = %err, "Failed to handle event");
    }
}
