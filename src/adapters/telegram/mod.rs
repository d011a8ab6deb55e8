//! Telegram adapters (teloxide).
//!
//! - `TelegramTransport` - ChatTransport over the Bot API
//! - `run_dispatcher` - long polling, maps updates to `Event`s
//! - `inline_keyboard` - renders domain keyboards

mod dispatcher;
mod keyboard;
mod transport;

pub use dispatcher::run_dispatcher;
pub use keyboard::inline_keyboard;
pub use transport::TelegramTransport;
