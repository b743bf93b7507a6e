//! Conversions from teloxide updates to core types.

use crate::core::types::{MESSAGE_TYPE_CALLBACK, MESSAGE_TYPE_OTHER, MESSAGE_TYPE_TEXT};
use crate::core::{Chat, Message, ToCoreMessage, ToCoreUser, User};

/// Telegram user → core user.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Telegram chat message → core message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let (content, message_type) = match msg.text() {
            Some(text) => (text.to_string(), MESSAGE_TYPE_TEXT),
            None => (String::new(), MESSAGE_TYPE_OTHER),
        };
        Message {
            id: msg.id.0.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(unknown_user),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: format!("{:?}", msg.chat.kind),
            },
            content,
            message_type: message_type.to_string(),
            created_at: chrono::Utc::now(),
            callback_data: None,
        }
    }
}

/// Telegram button press → core message. `id` is the message that carried the keyboard; without one
/// (inaccessible or inline-mode message) the press is treated as coming from the user's private chat.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreMessage for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Message {
        let query = self.0;
        let user = TelegramUserWrapper(&query.from).to_core();
        let (id, chat) = match query.message.as_ref() {
            Some(origin) => (
                origin.id().0.to_string(),
                Chat {
                    id: origin.chat().id.0,
                    chat_type: format!("{:?}", origin.chat().kind),
                },
            ),
            None => (
                String::new(),
                Chat {
                    id: user.id,
                    chat_type: "Private".to_string(),
                },
            ),
        };
        Message {
            id,
            user,
            chat,
            content: String::new(),
            message_type: MESSAGE_TYPE_CALLBACK.to_string(),
            created_at: chrono::Utc::now(),
            callback_data: Some(query.data.clone().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{CallbackQuery, Message as TgMessage};

    fn tg_message(extra: &str) -> TgMessage {
        let json = format!(
            r#"{{
                "message_id": 7,
                "date": 1700000000,
                "chat": {{"id": 42, "type": "private", "first_name": "Ann"}},
                "from": {{"id": 42, "is_bot": false, "first_name": "Ann", "username": "ann"}}
                {}
            }}"#,
            extra
        );
        serde_json::from_str(&json).unwrap()
    }

    /// **Test: text message maps ids, user and content; message_type is text.**
    #[test]
    fn test_text_message_to_core() {
        let msg = tg_message(r#", "text": "Hello""#);
        let core = TelegramMessageWrapper(&msg).to_core();
        assert_eq!(core.id, "7");
        assert_eq!(core.user.id, 42);
        assert_eq!(core.user.username.as_deref(), Some("ann"));
        assert_eq!(core.chat.id, 42);
        assert_eq!(core.content, "Hello");
        assert!(core.is_text());
        assert!(!core.is_callback());
    }

    /// **Test: message without text (e.g. sticker, location) becomes `other` with empty content.**
    #[test]
    fn test_non_text_message_to_core() {
        let msg = tg_message(r#", "location": {"latitude": 1.0, "longitude": 2.0}"#);
        let core = TelegramMessageWrapper(&msg).to_core();
        assert_eq!(core.message_type, MESSAGE_TYPE_OTHER);
        assert!(core.content.is_empty());
    }

    /// **Test: button press carries callback data and points at the keyboard's message.**
    #[test]
    fn test_callback_query_to_core() {
        let query: CallbackQuery = serde_json::from_str(
            r#"{
                "id": "q1",
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "chat_instance": "ci",
                "data": "mode_funny",
                "message": {
                    "message_id": 99,
                    "date": 1700000000,
                    "chat": {"id": -100, "type": "group", "title": "g"},
                    "text": "Select AI Personality:"
                }
            }"#,
        )
        .unwrap();
        let core = TelegramCallbackWrapper(&query).to_core();
        assert_eq!(core.id, "99");
        assert_eq!(core.chat.id, -100);
        assert_eq!(core.user.id, 42);
        assert_eq!(core.callback_data.as_deref(), Some("mode_funny"));
        assert!(core.is_callback());
    }

    /// **Test: callback without an origin message falls back to the user's private chat.**
    #[test]
    fn test_callback_without_message_uses_user_chat() {
        let query: CallbackQuery = serde_json::from_str(
            r#"{
                "id": "q2",
                "from": {"id": 5, "is_bot": false, "first_name": "Bo"},
                "chat_instance": "ci",
                "inline_message_id": "im",
                "data": "continue"
            }"#,
        )
        .unwrap();
        let core = TelegramCallbackWrapper(&query).to_core();
        assert_eq!(core.chat.id, 5);
        assert!(core.id.is_empty());
        assert_eq!(core.callback_data.as_deref(), Some("continue"));
    }
}
