//! Shared test doubles: a recording [`Bot`], a scripted gateway, config and message builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_gateway::{AiGateway, GatewayError, GatewayRequest};
use async_trait::async_trait;
use chrono::Utc;
use relay_bot::{
    BaseConfig, Bot, BotConfig, BotError, Chat, Message, RelayConfig, Reply, Result, User,
};

pub const USER_ID: i64 = 1001;

/// Everything the bot was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text { chat_id: i64, text: String },
    Reply { chat_id: i64, reply: Reply },
    Edit { chat_id: i64, message_id: String, reply: Reply },
    Typing { chat_id: i64 },
}

#[derive(Default)]
pub struct RecordingBot {
    pub outbound: Mutex<Vec<Outbound>>,
    next_id: AtomicUsize,
    /// When set, send_reply fails as if Telegram rejected the request.
    pub fail_replies: AtomicBool,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let bot = Self::default();
        bot.fail_replies.store(true, Ordering::SeqCst);
        Arc::new(bot)
    }

    pub fn outbound(&self) -> Vec<Outbound> {
        self.outbound.lock().unwrap().clone()
    }

    /// Replies and edits only (typing actions filtered out).
    pub fn delivered(&self) -> Vec<Outbound> {
        self.outbound()
            .into_iter()
            .filter(|o| !matches!(o, Outbound::Typing { .. }))
            .collect()
    }

    pub fn last_reply(&self) -> Option<Reply> {
        self.outbound().into_iter().rev().find_map(|o| match o {
            Outbound::Reply { reply, .. } | Outbound::Edit { reply, .. } => Some(reply),
            _ => None,
        })
    }

    pub fn typing_count(&self) -> usize {
        self.outbound()
            .iter()
            .filter(|o| matches!(o, Outbound::Typing { .. }))
            .count()
    }

    fn record(&self, outbound: Outbound) {
        self.outbound.lock().unwrap().push(outbound);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Outbound::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String> {
        if self.fail_replies.load(Ordering::SeqCst) {
            return Err(BotError::Bot("Forbidden: bot was blocked by the user".into()));
        }
        self.record(Outbound::Reply {
            chat_id: chat.id,
            reply: reply.clone(),
        });
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst).to_string())
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        self.record(Outbound::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.record(Outbound::Typing { chat_id: chat.id });
        Ok(())
    }
}

/// Gateway answering from a script; falls back to echoing the prompt once the script runs out.
#[derive(Default)]
pub struct StubGateway {
    script: Mutex<VecDeque<std::result::Result<String, GatewayError>>>,
    pub requests: Mutex<Vec<GatewayRequest>>,
    pub delay: Option<Duration>,
    in_flight: AtomicUsize,
    /// Highest number of concurrent ask() calls observed.
    pub max_in_flight: AtomicUsize,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(replies: &[std::result::Result<&str, GatewayError>]) -> Self {
        let gateway = Self::default();
        *gateway.script.lock().unwrap() = replies
            .iter()
            .map(|r| r.clone().map(str::to_string))
            .collect();
        gateway
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GatewayRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AiGateway for StubGateway {
    async fn ask(&self, request: GatewayRequest) -> std::result::Result<String, GatewayError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.script.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        scripted.unwrap_or_else(|| Ok(format!("echo: {}", request.message)))
    }
}

pub fn test_config() -> BotConfig {
    BotConfig {
        base: BaseConfig {
            bot_token: "test_bot_token_12345".to_string(),
            telegram_api_url: None,
            log_file: "logs/relay-bot-test.log".to_string(),
            app_env: "test".to_string(),
            port: 3000,
            public_url: None,
        },
        relay: RelayConfig {
            ai_endpoint: "http://127.0.0.1:9/api/chatgpt".to_string(),
            ai_timeout_secs: 5,
            ai_context_turns: 0,
            max_message_chars: 1000,
            history_cap: 10,
            session_ttl_secs: 1800,
            session_sweep_interval_secs: 600,
        },
    }
}

fn user(id: i64) -> User {
    User {
        id,
        username: Some("tester".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

fn chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: "Private".to_string(),
    }
}

pub fn text_message(user_id: i64, text: &str) -> Message {
    Message {
        id: "10".to_string(),
        user: user(user_id),
        chat: chat(user_id),
        content: text.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
        callback_data: None,
    }
}

/// Button press on message `origin_id`.
pub fn callback(user_id: i64, data: &str, origin_id: &str) -> Message {
    Message {
        id: origin_id.to_string(),
        user: user(user_id),
        chat: chat(user_id),
        content: String::new(),
        message_type: "callback".to_string(),
        created_at: Utc::now(),
        callback_data: Some(data.to_string()),
    }
}

pub fn sticker(user_id: i64) -> Message {
    Message {
        message_type: "other".to_string(),
        ..text_message(user_id, "")
    }
}
