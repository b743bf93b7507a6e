//! Marks user activity on every inbound update (creating the session on first contact).

use crate::core::{Handler, Message, Result};
use crate::session::SessionStore;
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SessionHandler {
    store: SessionStore,
}

impl SessionHandler {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for SessionHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        // Channel posts and other sender-less updates carry no user to keep state for.
        if message.user.id == 0 {
            debug!(chat_id = message.chat.id, "step: update without sender, chain stopped");
            return Ok(false);
        }
        self.store.touch(message.user.id).await;
        debug!(user_id = message.user.id, "step: session touched");
        Ok(true)
    }
}
