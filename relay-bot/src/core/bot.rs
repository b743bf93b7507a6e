//! Bot abstraction for delivering replies.
//!
//! [`Bot`] is transport-agnostic; `crate::telegram::TelegramBotAdapter` implements it via teloxide.
//! Tests substitute a recording implementation.

use crate::core::error::{BotError, Result};
use crate::core::types::{Chat, Reply};
use async_trait::async_trait;

/// Sending, editing and chat-action operations used by handlers.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends plain text to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply (formatting + keyboard) and returns the new message id.
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String>;
    /// Replaces the text (and inline keyboard, if any) of an existing message.
    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()>;
    /// Shows the "typing…" indicator.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit_reply.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
