//! The conversation state machine.
//!
//! Pure: given a session and an event it mutates the session's data and
//! returns the next state plus effects. Admission control and the
//! completion call happen outside; their outcome is fed back through
//! [`ConversationMachine::on_generation`].

use crate::domain::foundation::StateMachine;

use super::chunking::split_into_chunks;
use super::session::truncate_with_ellipsis;
use super::templates::{self, elicitation_for_category, system_instruction_for_category};
use super::{
    ConversationState, Decision, Effect, Event, FailureCategory, GenerationKind,
    GenerationOutcome, GenerationPlan, Keyboard, OutgoingMessage, Session, Transition,
};

/// Platform message size limit used when none is configured.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 4096;

/// `/history` previews are cut to this many chars.
const HISTORY_PREVIEW_LIMIT: usize = 150;

/// Drives category choice, description intake, prompt display and refinement.
#[derive(Debug, Clone, Copy)]
pub struct ConversationMachine {
    max_message_length: usize,
}

impl Default for ConversationMachine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGE_LENGTH)
    }
}

impl ConversationMachine {
    /// Creates a machine that chunks generated output to `max_message_length` chars.
    pub fn new(max_message_length: usize) -> Self {
        Self {
            max_message_length: max_message_length.max(1),
        }
    }

    /// Handles one user event.
    ///
    /// Returns `Decision::Generate` when the event needs a completion call;
    /// the session state is left untouched in that case.
    pub fn on_event(&self, session: &mut Session, event: Event) -> Decision {
        let transition = match event {
            Event::Start | Event::Unrecognized => main_menu(templates::WELCOME),
            Event::CancelRequested => main_menu(templates::CANCELLED),
            Event::BackRequested | Event::ApproveRequested => main_menu(templates::CHOOSE_CATEGORY),
            Event::HelpRequested => Transition::new(
                session.state,
                vec![Effect::Send(OutgoingMessage::markdown(templates::HELP))],
            ),
            Event::HistoryRequested => Transition::new(
                session.state,
                vec![Effect::Send(OutgoingMessage::markdown(render_history(session)))],
            ),
            Event::CategorySelected(category) => {
                session.category = Some(category);
                Transition::new(
                    ConversationState::AwaitingDescription,
                    vec![send_with(elicitation_for_category(category), Keyboard::BackToMenu)],
                )
            }
            Event::RefineRequested => {
                if session.last_prompt.is_some() {
                    refinement_request()
                } else {
                    main_menu(templates::CHOOSE_CATEGORY)
                }
            }
            Event::TextReceived(text) => match session.state {
                ConversationState::MainMenu => main_menu(templates::CHOOSE_CATEGORY),
                ConversationState::AwaitingDescription => {
                    match self.on_description(session, &text) {
                        Ok(plan) => return Decision::Generate(plan),
                        Err(transition) => transition,
                    }
                }
                ConversationState::AwaitingRefinement => {
                    match self.on_refinement(session, &text) {
                        Ok(plan) => return Decision::Generate(plan),
                        Err(transition) => transition,
                    }
                }
                // Keeps the delivered prompt under review
                ConversationState::PromptShown => Transition::new(
                    ConversationState::PromptShown,
                    vec![send_with(templates::APPROVE_OR_REFINE, Keyboard::ApproveOrRefine)],
                ),
            },
        };

        Decision::Transition(self.settle(session, transition))
    }

    /// Completes a generation requested by [`on_event`](Self::on_event).
    pub fn on_generation(
        &self,
        session: &mut Session,
        plan: GenerationPlan,
        outcome: GenerationOutcome,
    ) -> Transition {
        let transition = match (plan.kind, outcome) {
            (GenerationKind::Initial { .. }, GenerationOutcome::RateLimited) => Transition::new(
                ConversationState::AwaitingDescription,
                vec![Effect::Send(OutgoingMessage::markdown(templates::RATE_LIMITED))],
            ),
            (GenerationKind::Refinement { .. }, GenerationOutcome::RateLimited) => Transition::new(
                ConversationState::AwaitingRefinement,
                vec![Effect::Send(OutgoingMessage::markdown(templates::RATE_LIMITED))],
            ),
            (GenerationKind::Initial { category, description }, GenerationOutcome::Succeeded(prompt)) => {
                session.record_generation(category, &prompt);
                let effects = self.deliver_prompt(&prompt);
                session.accept_prompt(category, prompt, description);
                Transition::new(ConversationState::PromptShown, effects)
            }
            (GenerationKind::Refinement { .. }, GenerationOutcome::Succeeded(prompt)) => {
                let effects = self.deliver_prompt(&prompt);
                session.last_prompt = Some(prompt);
                Transition::new(ConversationState::PromptShown, effects)
            }
            (GenerationKind::Initial { .. }, GenerationOutcome::Failed(failure)) => Transition::new(
                ConversationState::MainMenu,
                vec![
                    Effect::ReplaceStatus(OutgoingMessage::markdown(failure_message(failure))),
                    send_with(templates::CHOOSE_CATEGORY, Keyboard::Categories),
                ],
            ),
            (GenerationKind::Refinement { .. }, GenerationOutcome::Failed(failure)) => Transition::new(
                ConversationState::PromptShown,
                vec![
                    Effect::ReplaceStatus(OutgoingMessage::markdown(failure_message(failure))),
                    send_with(templates::APPROVE_OR_REFINE, Keyboard::ApproveOrRefine),
                ],
            ),
        };

        self.settle(session, transition)
    }

    fn on_description(&self, session: &Session, text: &str) -> Result<GenerationPlan, Transition> {
        let Some(category) = session.category else {
            return Err(main_menu(templates::CHOOSE_CATEGORY));
        };

        let description = text.trim();
        if description.is_empty() {
            return Err(Transition::new(
                ConversationState::AwaitingDescription,
                vec![send_with(elicitation_for_category(category), Keyboard::BackToMenu)],
            ));
        }

        Ok(GenerationPlan {
            kind: GenerationKind::Initial {
                category,
                description: description.to_string(),
            },
            system_instruction: system_instruction_for_category(category).to_string(),
            user_message: description.to_string(),
        })
    }

    fn on_refinement(&self, session: &Session, text: &str) -> Result<GenerationPlan, Transition> {
        let Some(current_prompt) = session.last_prompt.as_deref() else {
            return Err(main_menu(templates::CHOOSE_CATEGORY));
        };

        let requested_changes = text.trim();
        if requested_changes.is_empty() {
            return Err(refinement_request());
        }

        Ok(GenerationPlan {
            kind: GenerationKind::Refinement {
                requested_changes: requested_changes.to_string(),
            },
            system_instruction: templates::REFINEMENT_INSTRUCTION.to_string(),
            user_message: templates::refinement_message(current_prompt, requested_changes),
        })
    }

    /// Header, the prompt itself (chunked when needed), then the next-step keyboard.
    fn deliver_prompt(&self, prompt: &str) -> Vec<Effect> {
        let mut effects = vec![
            Effect::ClearStatus,
            Effect::Send(OutgoingMessage::markdown(templates::HERE_IS_PROMPT)),
        ];
        effects.extend(
            split_into_chunks(prompt, self.max_message_length)
                .into_iter()
                .map(|chunk| Effect::Send(OutgoingMessage::plain(chunk))),
        );
        effects.push(send_with(templates::APPROVE_OR_REFINE, Keyboard::ApproveOrRefine));
        effects
    }

    /// Applies the transition's target state to the session.
    ///
    /// A target the state table forbids resets the user to the main menu.
    fn settle(&self, session: &mut Session, transition: Transition) -> Transition {
        match session.state.transition_to(transition.next) {
            Ok(next) => {
                session.state = next;
                transition
            }
            Err(err) => {
                tracing::warn!(user_id = %session.user_id, "{}; resetting to main menu", err);
                session.state = ConversationState::MainMenu;
                main_menu(templates::WELCOME)
            }
        }
    }
}

fn send_with(text: &str, keyboard: Keyboard) -> Effect {
    Effect::Send(OutgoingMessage::markdown(text).with_keyboard(keyboard))
}

fn main_menu(text: &str) -> Transition {
    Transition::new(
        ConversationState::MainMenu,
        vec![send_with(text, Keyboard::Categories)],
    )
}

fn refinement_request() -> Transition {
    Transition::new(
        ConversationState::AwaitingRefinement,
        vec![send_with(templates::SEND_REFINEMENT, Keyboard::BackToMenu)],
    )
}

/// Maps a failure class to its user-facing text.
pub fn failure_message(failure: FailureCategory) -> &'static str {
    match failure {
        FailureCategory::NetworkOrTimeout => templates::ERROR_NETWORK,
        FailureCategory::AuthOrQuota => templates::ERROR_API,
        FailureCategory::Unknown => templates::ERROR_UNKNOWN,
    }
}

/// Renders `/history`, newest entry first.
fn render_history(session: &Session) -> String {
    if session.history_len() == 0 {
        return templates::HISTORY_EMPTY.to_string();
    }

    let lines: Vec<String> = session
        .history()
        .rev()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. *{}* ({}) — {}",
                i + 1,
                entry.category,
                entry.created_at,
                truncate_with_ellipsis(&entry.text, HISTORY_PREVIEW_LIMIT)
            )
        })
        .collect();

    format!("{}{}", templates::history_header(session.history_len()), lines.join("\n"))
}
