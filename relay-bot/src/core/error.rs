//! Error type for the bot core.

use thiserror::Error;

/// Errors surfaced by handlers and [`crate::core::Bot`] implementations.
#[derive(Error, Debug)]
pub enum BotError {
    /// Transport failure (Telegram rejected or never received the request).
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
