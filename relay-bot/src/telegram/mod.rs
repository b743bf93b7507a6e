//! Telegram layer: update adapters, Bot implementation, dispatcher runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::{register_commands, run_dispatcher};
