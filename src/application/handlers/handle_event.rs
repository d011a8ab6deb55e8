//! HandleEvent command handler.
//!
//! Runs one inbound user event through the conversation machine: locks the
//! user's session for the whole event, performs admission and generation
//! when the machine asks for it, and executes the resulting effects against
//! the chat transport.

use std::sync::Arc;
use thiserror::Error;

use crate::application::AppContext;
use crate::domain::foundation::{ChatId, UserId};
use crate::domain::prompt::{
    templates, ConversationState, Decision, Effect, Event, GenerationKind, GenerationOutcome,
    GenerationPlan, OutgoingMessage, Session, Transition,
};
use crate::ports::{RateLimitResult, RequestMetadata, SentMessage, TransportError};

/// An inbound event for one user in one chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingEvent {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub event: Event,
}

impl IncomingEvent {
    pub fn new(user_id: UserId, chat_id: ChatId, event: Event) -> Self {
        Self {
            user_id,
            chat_id,
            event,
        }
    }
}

/// Errors that abort handling of a single event.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// A required message could not be delivered.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Drives the conversation for every user.
#[derive(Clone)]
pub struct ConversationController {
    ctx: Arc<AppContext>,
}

impl ConversationController {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Handles one event and returns the user's resulting state.
    ///
    /// Events of the same user are serialized on the session lock; other
    /// users are never blocked.
    ///
    /// # Errors
    ///
    /// `ConversationError::Transport` when a required send fails. Session
    /// changes made before the failure are kept.
    pub async fn handle(&self, incoming: IncomingEvent) -> Result<ConversationState, ConversationError> {
        let IncomingEvent {
            user_id,
            chat_id,
            event,
        } = incoming;

        let handle = self.ctx.sessions.session(&user_id).await;
        let mut session = handle.lock().await;

        tracing::debug!(
            user_id = %user_id,
            state = ?session.state,
            event = event.kind(),
            "Handling event"
        );
        if let Event::CategorySelected(category) = &event {
            tracing::info!(user_id = %user_id, category = %category, "Category selected");
        }

        match self.ctx.machine.on_event(&mut session, event) {
            Decision::Transition(transition) => {
                self.execute(chat_id, transition, None).await?;
            }
            Decision::Generate(plan) => {
                self.generate(&mut session, chat_id, plan).await?;
            }
        }

        Ok(session.state)
    }

    async fn generate(
        &self,
        session: &mut Session,
        chat_id: ChatId,
        plan: GenerationPlan,
    ) -> Result<(), ConversationError> {
        let user_id = session.user_id;

        if !self.admit(&user_id).await {
            let transition =
                self.ctx
                    .machine
                    .on_generation(session, plan, GenerationOutcome::RateLimited);
            return self.execute(chat_id, transition, None).await;
        }

        let status = match self
            .ctx
            .transport
            .send_text(chat_id, OutgoingMessage::markdown(templates::GENERATING))
            .await
        {
            Ok(sent) => Some(sent),
            Err(err) => {
                tracing::debug!(user_id = %user_id, error = %err, "Status message not sent");
                None
            }
        };

        let outcome = match self
            .ctx
            .completion
            .generate(
                &plan.system_instruction,
                &plan.user_message,
                RequestMetadata::new(user_id),
            )
            .await
        {
            Ok(text) => {
                match &plan.kind {
                    GenerationKind::Initial { category, .. } => {
                        tracing::info!(user_id = %user_id, category = %category, "Prompt generated");
                    }
                    GenerationKind::Refinement { .. } => {
                        tracing::info!(
                            user_id = %user_id,
                            category = ?session.last_category,
                            "Prompt refined"
                        );
                    }
                }
                GenerationOutcome::Succeeded(text)
            }
            Err(err) => GenerationOutcome::Failed(err.failure_category()),
        };

        let transition = self.ctx.machine.on_generation(session, plan, outcome);
        self.execute(chat_id, transition, status).await
    }

    /// An unavailable limiter admits the request.
    async fn admit(&self, user_id: &UserId) -> bool {
        match self.ctx.rate_limiter.check(user_id).await {
            Ok(RateLimitResult::Allowed(status)) => {
                tracing::debug!(
                    user_id = %user_id,
                    remaining = status.remaining,
                    window_secs = status.window_secs,
                    "Generation admitted"
                );
                true
            }
            Ok(RateLimitResult::Denied(denied)) => {
                tracing::info!(
                    user_id = %user_id,
                    retry_after_secs = denied.retry_after_secs,
                    "Generation rate limited"
                );
                false
            }
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "Rate limiter unavailable, admitting");
                true
            }
        }
    }

    async fn execute(
        &self,
        chat_id: ChatId,
        transition: Transition,
        status: Option<SentMessage>,
    ) -> Result<(), ConversationError> {
        let transport = &self.ctx.transport;

        for effect in transition.effects {
            match effect {
                Effect::Send(message) => {
                    transport.send_text(chat_id, message).await?;
                }
                Effect::ClearStatus => {
                    if let Some(status) = status {
                        if let Err(err) = transport.delete_message(chat_id, status).await {
                            tracing::debug!(error = %err, "Ignoring failed status delete");
                        }
                    }
                }
                Effect::ReplaceStatus(message) => {
                    let edited = match status {
                        Some(status) => match transport
                            .edit_message(chat_id, status, &message.text, message.format)
                            .await
                        {
                            Ok(()) => true,
                            Err(err) => {
                                tracing::debug!(error = %err, "Status edit failed, sending instead");
                                false
                            }
                        },
                        None => false,
                    };
                    if !edited {
                        transport.send_text(chat_id, message).await?;
                    }
                }
            }
        }

        Ok(())
    }
}
