//! Core types and traits: Handler, Bot, Message, Reply, HandlerResponse, error, logger.
//! Transport-agnostic; the telegram module adapts teloxide onto these.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use types::{
    Button, Chat, Delivery, Handler, HandlerResponse, Keyboard, Message, Reply, TextFormat,
    ToCoreMessage, ToCoreUser, User,
};
