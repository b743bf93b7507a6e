//! Core types: user, chat, message, outbound reply, handler response, and Handler trait.
//!
//! One file per main type.

mod chat;
mod handler;
mod message;
mod reply;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{Message, MESSAGE_TYPE_CALLBACK, MESSAGE_TYPE_OTHER, MESSAGE_TYPE_TEXT};
pub use reply::{Button, Delivery, Keyboard, Reply, TextFormat};
pub use response::HandlerResponse;
pub use user::User;
