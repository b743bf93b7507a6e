//! Logs each update in before() and the final response in after(); always continues.

use crate::core::{Handler, HandlerResponse, Message, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            chat_id = message.chat.id,
            message_type = %message.message_type,
            callback_data = ?message.callback_data,
            content_len = message.content.chars().count(),
            "Received update"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let reply_len = match response {
            HandlerResponse::Reply(text) => Some(text.chars().count()),
            _ => None,
        };
        debug!(
            user_id = message.user.id,
            message_id = %message.id,
            reply_len = ?reply_len,
            "Processed update"
        );
        Ok(())
    }
}
