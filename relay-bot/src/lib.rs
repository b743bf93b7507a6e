//! # Telegram AI relay bot
//!
//! Forwards user messages to a remote AI gateway and relays the answer back. Per-user sessions
//! (history, mode, last response) live in memory and expire after inactivity.
//!
//! Layers: core (Handler, Bot, Message, Reply), chain (HandlerChain), session (store), router
//! (commands, actions, free text), telegram (teloxide adapters and dispatcher).

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod router;
pub mod runner;
pub mod session;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, parse_message_id, Bot, BotError, Button, Chat, Delivery, Handler,
    HandlerResponse, Keyboard, Message, Reply, Result, TextFormat, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{
    run_dispatcher, TelegramBotAdapter, TelegramCallbackWrapper, TelegramMessageWrapper,
    TelegramUserWrapper,
};

pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig, DeliveryMode, RelayConfig};
pub use handlers::{LoggingHandler, RouterHandler, SessionHandler};
pub use router::{Action, Command, CommandRouter, FollowUp, Input, RouterLimits};
pub use runner::{process_message, run_bot, RelayBot};
pub use session::{Mode, Session, SessionHandle, SessionStore, Turn};
