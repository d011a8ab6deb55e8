//! Integration tests for the conversation flow.
//!
//! These tests drive the controller end to end:
//! 1. Events enter through `ConversationController::handle`
//! 2. The rate limiter admits or rejects generations
//! 3. The completion client retries against a mock provider
//! 4. Outgoing messages are captured by the recording transport
//!
//! Time-sensitive tests run on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use prompt_forge::adapters::ai::{
    MockCompletionProvider, MockResponse, ResilientCompletionClient, RetryPolicy,
};
use prompt_forge::adapters::chat::{RecordingTransport, TransportOp};
use prompt_forge::adapters::rate_limiter::{RateLimitConfig, SlidingWindowRateLimiter};
use prompt_forge::adapters::storage::InMemorySessionStore;
use prompt_forge::application::{AppContext, ConversationController, IncomingEvent};
use prompt_forge::domain::foundation::{ChatId, UserId};
use prompt_forge::domain::prompt::{
    templates, Category, ConversationMachine, ConversationState, Event, Keyboard,
};
use prompt_forge::ports::{AIError, RequestMetadata, SessionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestBot {
    controller: ConversationController,
    transport: RecordingTransport,
    provider: MockCompletionProvider,
    sessions: Arc<InMemorySessionStore>,
}

impl TestBot {
    fn new(provider: MockCompletionProvider) -> Self {
        Self::with_limits(provider, RateLimitConfig::default(), 3)
    }

    fn with_limits(provider: MockCompletionProvider, limits: RateLimitConfig, attempts: u32) -> Self {
        let transport = RecordingTransport::new();
        let sessions = Arc::new(InMemorySessionStore::new());
        let ctx = AppContext::new(
            sessions.clone(),
            Arc::new(SlidingWindowRateLimiter::new(limits)),
            ResilientCompletionClient::new(
                Arc::new(provider.clone()),
                RetryPolicy::new(attempts, Duration::from_secs(60)),
            ),
            Arc::new(transport.clone()),
            ConversationMachine::default(),
        );

        Self {
            controller: ConversationController::new(Arc::new(ctx)),
            transport,
            provider,
            sessions,
        }
    }

    async fn send(&self, user: u64, event: Event) -> ConversationState {
        self.controller
            .handle(IncomingEvent::new(
                UserId::new(user),
                ChatId::new(user as i64),
                event,
            ))
            .await
            .expect("event handled")
    }

    async fn text(&self, user: u64, text: &str) -> ConversationState {
        self.send(user, Event::from_text(text)).await
    }

    async fn generate(&self, user: u64, category: Category, description: &str) -> ConversationState {
        self.send(user, Event::CategorySelected(category)).await;
        self.text(user, description).await
    }

    async fn session(&self, user: u64) -> prompt_forge::domain::prompt::Session {
        let handle = self.sessions.session(&UserId::new(user)).await;
        let session = handle.lock().await;
        session.clone()
    }
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[tokio::test(start_paused = true)]
async fn start_select_code_and_generate() {
    let bot = TestBot::new(MockCompletionProvider::new().with_response("Write a REST API…"));

    assert_eq!(bot.text(1, "/start").await, ConversationState::MainMenu);
    let welcome = bot.transport.last_sent().unwrap();
    assert_eq!(welcome.text, templates::WELCOME);
    assert_eq!(welcome.keyboard, Some(Keyboard::Categories));

    assert_eq!(
        bot.send(1, Event::from_callback("code")).await,
        ConversationState::AwaitingDescription
    );
    assert_eq!(
        bot.transport.last_sent().unwrap().text,
        templates::elicitation_for_category(Category::Code)
    );

    bot.transport.clear();
    assert_eq!(bot.text(1, "a REST API in Go").await, ConversationState::PromptShown);

    let texts = bot.transport.sent_texts();
    assert!(texts.iter().any(|t| t == "Write a REST API…"));
    assert_eq!(
        bot.transport.last_sent().unwrap().keyboard,
        Some(Keyboard::ApproveOrRefine)
    );

    let call = &bot.provider.get_calls()[0];
    assert_eq!(
        call.system_instruction,
        templates::system_instruction_for_category(Category::Code)
    );
    assert_eq!(call.user_message, "a REST API in Go");

    let session = bot.session(1).await;
    assert_eq!(session.state, ConversationState::PromptShown);
    assert_eq!(session.history_len(), 1);
    assert_eq!(session.history().next().unwrap().category, Category::Code);
    assert_eq!(session.last_prompt.as_deref(), Some("Write a REST API…"));
}

#[tokio::test(start_paused = true)]
async fn refinement_replaces_last_prompt_without_new_history() {
    let bot = TestBot::new(
        MockCompletionProvider::new()
            .with_response("Write a REST API…")
            .with_response("Short REST API prompt"),
    );
    bot.generate(1, Category::Code, "a REST API in Go").await;

    assert_eq!(
        bot.send(1, Event::from_callback("refine")).await,
        ConversationState::AwaitingRefinement
    );
    assert_eq!(bot.text(1, "make it shorter").await, ConversationState::PromptShown);

    let refine_call = &bot.provider.get_calls()[1];
    assert!(refine_call.user_message.contains("Write a REST API…"));
    assert!(refine_call.user_message.contains("make it shorter"));

    let session = bot.session(1).await;
    assert_eq!(session.last_prompt.as_deref(), Some("Short REST API prompt"));
    assert_eq!(session.history_len(), 1);
}

#[tokio::test(start_paused = true)]
async fn sixth_request_in_a_minute_is_rate_limited() {
    let bot = TestBot::new(MockCompletionProvider::new());

    for i in 0..5 {
        assert_eq!(
            bot.generate(1, Category::Image, &format!("fox {}", i)).await,
            ConversationState::PromptShown
        );
    }

    bot.send(1, Event::CategorySelected(Category::Image)).await;
    bot.transport.clear();
    assert_eq!(bot.text(1, "one more fox").await, ConversationState::AwaitingDescription);

    assert_eq!(bot.transport.sent_texts(), vec![templates::RATE_LIMITED.to_string()]);
    assert_eq!(bot.provider.call_count(), 5);

    // Another user is unaffected
    assert_eq!(
        bot.generate(2, Category::Image, "a cat").await,
        ConversationState::PromptShown
    );

    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(bot.text(1, "one more fox").await, ConversationState::PromptShown);
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_return_to_main_menu_with_error() {
    let bot = TestBot::new(MockCompletionProvider::failing(AIError::network("connection reset")));
    bot.send(1, Event::CategorySelected(Category::Video)).await;
    bot.transport.clear();

    assert_eq!(bot.text(1, "a drone shot").await, ConversationState::MainMenu);
    assert_eq!(bot.provider.call_count(), 3);

    let ops = bot.transport.operations();
    let error_shown = ops.iter().any(|op| match op {
        TransportOp::Edited { text, .. } => text == templates::ERROR_NETWORK,
        TransportOp::Sent { message, .. } => message.text == templates::ERROR_NETWORK,
        _ => false,
    });
    assert!(error_shown, "network error not shown: {:?}", ops);

    let last = bot.transport.last_sent().unwrap();
    assert_eq!(last.text, templates::CHOOSE_CATEGORY);
    assert_eq!(last.keyboard, Some(Keyboard::Categories));
    assert_eq!(bot.session(1).await.history_len(), 0);
}

#[tokio::test(start_paused = true)]
async fn quota_failure_shows_api_error() {
    let bot = TestBot::with_limits(
        MockCompletionProvider::failing(AIError::QuotaExceeded("Insufficient Balance".into())),
        RateLimitConfig::default(),
        1,
    );
    bot.send(1, Event::CategorySelected(Category::Text)).await;

    assert_eq!(bot.text(1, "a haiku").await, ConversationState::MainMenu);

    let ops = bot.transport.operations();
    assert!(ops.iter().any(|op| matches!(
        op,
        TransportOp::Edited { text, .. } if text == templates::ERROR_API
    )));
}

#[tokio::test(start_paused = true)]
async fn slash_prefixed_description_is_generated_not_treated_as_command() {
    let bot = TestBot::new(MockCompletionProvider::new());
    bot.send(1, Event::CategorySelected(Category::Code)).await;

    assert_eq!(
        bot.text(1, "/etc/hosts parser in Rust").await,
        ConversationState::PromptShown
    );
    assert_eq!(bot.provider.get_calls()[0].user_message, "/etc/hosts parser in Rust");
}

#[tokio::test(start_paused = true)]
async fn stray_text_after_prompt_keeps_it_under_review() {
    let bot = TestBot::new(MockCompletionProvider::new().with_response("A red fox"));
    bot.generate(1, Category::Image, "a fox").await;
    bot.transport.clear();

    assert_eq!(bot.text(1, "thanks!").await, ConversationState::PromptShown);
    assert_eq!(
        bot.transport.last_sent().unwrap().keyboard,
        Some(Keyboard::ApproveOrRefine)
    );
    assert_eq!(bot.session(1).await.last_prompt.as_deref(), Some("A red fox"));
    assert_eq!(bot.provider.call_count(), 1);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(start_paused = true)]
async fn slow_generation_does_not_block_other_users() {
    let provider = MockCompletionProvider::new()
        .with_response("slow prompt")
        .with_delay(Duration::from_secs(30));
    let bot = TestBot::new(provider);
    bot.send(1, Event::CategorySelected(Category::Code)).await;

    let controller = bot.controller.clone();
    let slow = tokio::spawn(async move {
        controller
            .handle(IncomingEvent::new(
                UserId::new(1),
                ChatId::new(1),
                Event::from_text("a REST API"),
            ))
            .await
    });

    // Let user 1 reach the provider call
    for _ in 0..100 {
        if bot.provider.call_count() == 1 {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(bot.provider.call_count(), 1);

    let start = Instant::now();
    assert_eq!(bot.text(2, "/start").await, ConversationState::MainMenu);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(!slow.is_finished());

    let state = slow.await.expect("task joined").expect("event handled");
    assert_eq!(state, ConversationState::PromptShown);
    assert!(start.elapsed() >= Duration::from_secs(30));
}

// =============================================================================
// History
// =============================================================================

#[tokio::test(start_paused = true)]
async fn history_keeps_five_newest_generations() {
    let bot = TestBot::with_limits(
        MockCompletionProvider::new(),
        RateLimitConfig::per_minute(100),
        3,
    );
    for i in 1..=6 {
        bot.provider.push(MockResponse::Success(format!("prompt {}", i)));
        bot.generate(1, Category::Text, &format!("idea {}", i)).await;
    }

    let session = bot.session(1).await;
    let texts: Vec<_> = session.history().map(|e| e.text.clone()).collect();
    assert_eq!(texts, vec!["prompt 2", "prompt 3", "prompt 4", "prompt 5", "prompt 6"]);

    bot.transport.clear();
    assert_eq!(bot.text(1, "/history").await, ConversationState::PromptShown);
    let listing = bot.transport.last_sent().unwrap().text;
    assert!(listing.find("prompt 6").unwrap() < listing.find("prompt 2").unwrap());
    assert!(!listing.contains("prompt 1"));
}

#[tokio::test(start_paused = true)]
async fn cancel_returns_to_menu_from_any_input_state() {
    let bot = TestBot::new(MockCompletionProvider::new());
    bot.send(1, Event::CategorySelected(Category::Code)).await;

    assert_eq!(bot.text(1, "/cancel").await, ConversationState::MainMenu);
    assert_eq!(bot.transport.last_sent().unwrap().text, templates::CANCELLED);

    // Text in the main menu never reaches the completion API
    assert_eq!(bot.text(1, "hello?").await, ConversationState::MainMenu);
    assert_eq!(bot.provider.call_count(), 0);
}

// =============================================================================
// Completion client
// =============================================================================

#[tokio::test(start_paused = true)]
async fn completion_fails_twice_then_succeeds() {
    let provider = MockCompletionProvider::new()
        .with_error(AIError::network("reset"))
        .with_error(AIError::timeout(60))
        .with_response("ok");
    let client = ResilientCompletionClient::new(Arc::new(provider.clone()), RetryPolicy::default());

    let text = client
        .generate("sys", "x", RequestMetadata::new(UserId::new(1)))
        .await
        .unwrap();

    assert_eq!(text, "ok");
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn completion_empty_response_after_all_attempts() {
    let provider = MockCompletionProvider::new().with_fallback(MockResponse::Success(String::new()));
    let client = ResilientCompletionClient::new(
        Arc::new(provider.clone()),
        RetryPolicy::new(2, Duration::from_secs(60)),
    );

    let err = client
        .generate("sys", "x", RequestMetadata::new(UserId::new(1)))
        .await
        .unwrap_err();

    assert_eq!(err, AIError::EmptyResponse);
    assert_eq!(provider.call_count(), 2);
}
