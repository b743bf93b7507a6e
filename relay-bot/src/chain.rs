//! # Handler chain
//!
//! Every update passes three phases: all `before` hooks in registration order (a `false` vetoes the
//! update), then `handle` until one handler answers `Stop` or `Reply`, then all `after` hooks in
//! reverse order with the final response.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

struct Entry {
    name: &'static str,
    handler: Arc<dyn Handler>,
}

/// Ordered handlers sharing one update. Cheap to clone.
#[derive(Clone, Default)]
pub struct HandlerChain {
    entries: Arc<Vec<Entry>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; it runs after every handler added before it.
    pub fn add_handler<H: Handler + 'static>(self, handler: Arc<H>) -> Self {
        let mut entries = Arc::try_unwrap(self.entries).unwrap_or_else(|shared| {
            shared
                .iter()
                .map(|e| Entry {
                    name: e.name,
                    handler: e.handler.clone(),
                })
                .collect()
        });
        entries.push(Entry {
            name: short_name(std::any::type_name::<H>()),
            handler: handler as Arc<dyn Handler>,
        });
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id, message_type = %message.message_type))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if let Some(vetoed_by) = self.run_before(message).await? {
            info!(handler = vetoed_by, "step: before returned false, chain stopped");
            return Ok(HandlerResponse::Stop);
        }

        let response = self.run_handle(message).await?;

        for entry in self.entries.iter().rev() {
            entry.handler.after(message, &response).await?;
        }

        debug!(chat_id = message.chat.id, response = ?response, "step: handler_chain finished");
        Ok(response)
    }

    /// Returns the name of the handler that vetoed the update, if any.
    async fn run_before(&self, message: &Message) -> Result<Option<&'static str>> {
        for entry in self.entries.iter() {
            if !entry.handler.before(message).await? {
                return Ok(Some(entry.name));
            }
        }
        Ok(None)
    }

    async fn run_handle(&self, message: &Message) -> Result<HandlerResponse> {
        for entry in self.entries.iter() {
            let response = entry.handler.handle(message).await?;
            debug!(handler = entry.name, response = ?response, "Handler processed");
            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                return Ok(response);
            }
        }
        Ok(HandlerResponse::Continue)
    }
}

/// `relay_bot::handlers::session_handler::SessionHandler` → `SessionHandler`.
fn short_name(type_name: &'static str) -> &'static str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

// Integration tests live in tests/handler_chain_test.rs
