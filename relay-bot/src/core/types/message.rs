//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

pub const MESSAGE_TYPE_TEXT: &str = "text";
pub const MESSAGE_TYPE_CALLBACK: &str = "callback";
pub const MESSAGE_TYPE_OTHER: &str = "other";

/// A single inbound update: a chat message or a button press.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport message id. For button presses this is the message that carried the keyboard.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    /// `text`, `callback` or `other` (stickers, photos, ...).
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    /// Opaque button id when the update is a button press.
    pub callback_data: Option<String>,
}

impl Message {
    pub fn is_callback(&self) -> bool {
        self.callback_data.is_some()
    }

    pub fn is_text(&self) -> bool {
        self.message_type == MESSAGE_TYPE_TEXT
    }
}
