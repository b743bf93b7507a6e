//! Terminal handler: classifies the update, routes it against the user's locked session and delivers
//! the reply through [`Bot`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::core::{Bot, Delivery, Handler, HandlerResponse, Message, Result};
use crate::router::{CommandRouter, Input};
use crate::session::SessionStore;

pub struct RouterHandler {
    router: Arc<CommandRouter>,
    store: SessionStore,
    bot: Arc<dyn Bot>,
}

impl RouterHandler {
    pub fn new(router: Arc<CommandRouter>, store: SessionStore, bot: Arc<dyn Bot>) -> Self {
        Self { router, store, bot }
    }

    async fn deliver(&self, message: &Message, reply: &crate::core::Reply) -> Result<()> {
        match reply.delivery {
            Delivery::EditOrigin if message.is_callback() && !message.id.is_empty() => {
                self.bot.edit_reply(&message.chat, &message.id, reply).await
            }
            _ => self.bot.send_reply(&message.chat, reply).await.map(|_| ()),
        }
    }
}

#[async_trait]
impl Handler for RouterHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(input) = Input::from_message(message) else {
            debug!(message_type = %message.message_type, "No routable input, ignoring");
            return Ok(HandlerResponse::Ignore);
        };

        let handle = self.store.get_or_create(message.user.id).await;
        // Held for the whole update: later updates of this user wait here.
        let mut session = handle.lock().await;

        if self.router.will_call_gateway(&session, &input) {
            if let Err(e) = self.bot.send_typing(&message.chat).await {
                warn!(error = %e, "Failed to send typing action");
            }
        }

        let reply = self.router.route(&mut session, &input).await;
        drop(session);

        self.deliver(message, &reply).await?;
        info!(
            chat_id = message.chat.id,
            reply_len = reply.text.chars().count(),
            "step: reply delivered"
        );

        Ok(HandlerResponse::Reply(reply.text))
    }
}
