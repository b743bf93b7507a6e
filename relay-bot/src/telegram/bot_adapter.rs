//! Wraps teloxide::Bot and implements [`crate::core::Bot`].

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Chat, Keyboard, Reply, Result, TextFormat};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    KeyboardMarkup, KeyboardRemove, MessageId, ParseMode, ReplyMarkup,
};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn inline_markup(rows: &[Vec<crate::core::Button>]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

fn reply_markup(keyboard: &Keyboard) -> ReplyMarkup {
    match keyboard {
        Keyboard::Inline(rows) => ReplyMarkup::InlineKeyboard(inline_markup(rows)),
        Keyboard::Reply { rows, resize } => {
            let markup = KeyboardMarkup::new(rows.iter().map(|row| {
                row.iter()
                    .map(|label| KeyboardButton::new(label.clone()))
                    .collect::<Vec<_>>()
            }));
            ReplyMarkup::Keyboard(if *resize {
                markup.resize_keyboard()
            } else {
                markup
            })
        }
        Keyboard::Remove => ReplyMarkup::KeyboardRemove(KeyboardRemove::new()),
    }
}

fn parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some(ParseMode::Html),
    }
}

fn transport_error(e: teloxide::RequestError) -> BotError {
    BotError::Bot(e.to_string())
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String> {
        let mut request = self.bot.send_message(ChatId(chat.id), reply.text.clone());
        if let Some(mode) = parse_mode(reply.format) {
            request = request.parse_mode(mode);
        }
        if let Some(keyboard) = &reply.keyboard {
            request = request.reply_markup(reply_markup(keyboard));
        }
        let sent = request.await.map_err(transport_error)?;
        Ok(sent.id.0.to_string())
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat.id), MessageId(id), reply.text.clone());
        if let Some(mode) = parse_mode(reply.format) {
            request = request.parse_mode(mode);
        }
        if let Some(Keyboard::Inline(rows)) = &reply.keyboard {
            request = request.reply_markup(inline_markup(rows));
        }
        request.await.map_err(transport_error)?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}
