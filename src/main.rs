//! Prompt Forge bot entry point.

use std::process;
use std::sync::Arc;

use secrecy::ExposeSecret;
use teloxide::Bot;
use tracing_subscriber::EnvFilter;

use prompt_forge::adapters::ai::{
    OpenAICompatibleProvider, OpenAIConfig, ResilientCompletionClient, RetryPolicy,
};
use prompt_forge::adapters::rate_limiter::{RateLimitConfig, SlidingWindowRateLimiter};
use prompt_forge::adapters::storage::InMemorySessionStore;
use prompt_forge::adapters::telegram::{run_dispatcher, TelegramTransport};
use prompt_forge::application::{AppContext, ConversationController};
use prompt_forge::config::AppConfig;
use prompt_forge::domain::prompt::ConversationMachine;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        process::exit(1);
    }

    let (Some(bot_token), Some(api_key)) =
        (config.telegram.bot_token.clone(), config.ai.api_key.clone())
    else {
        tracing::error!("Bot token and API key are required");
        process::exit(1);
    };

    let provider_config = OpenAIConfig::from_secret(api_key)
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());
    let provider = match OpenAICompatibleProvider::new(provider_config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create completion provider");
            process::exit(1);
        }
    };

    let completion = ResilientCompletionClient::new(
        Arc::new(provider),
        RetryPolicy::new(config.ai.max_attempts, config.ai.timeout()),
    );
    let rate_limiter =
        SlidingWindowRateLimiter::new(RateLimitConfig::per_minute(config.limits.requests_per_minute));
    let sessions = InMemorySessionStore::with_history_capacity(config.limits.history_capacity);

    let bot = Bot::new(bot_token.expose_secret());
    let transport = TelegramTransport::new(bot.clone());

    let ctx = AppContext::new(
        Arc::new(sessions),
        Arc::new(rate_limiter),
        completion,
        Arc::new(transport),
        ConversationMachine::new(config.limits.max_message_length),
    );
    let controller = Arc::new(ConversationController::new(Arc::new(ctx)));

    tracing::info!(
        model = %config.ai.model,
        requests_per_minute = config.limits.requests_per_minute,
        "Prompt Forge bot starting"
    );

    run_dispatcher(bot, controller).await;

    tracing::info!("Prompt Forge bot stopped");
}
