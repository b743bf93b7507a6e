//! Base config: Telegram connection, logging and update delivery. Loaded from env.

use anyhow::Result;
use std::env;
use std::net::SocketAddr;

use super::env_or;

pub const DEFAULT_LOG_FILE: &str = "logs/relay-bot.log";
pub const DEFAULT_PORT: u16 = 3000;

/// How updates reach the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    /// getUpdates long polling (local development).
    Polling,
    /// Telegram pushes updates to `url`; the HTTP server listens on `address`.
    Webhook {
        address: SocketAddr,
        url: reqwest::Url,
    },
}

/// Base config: Telegram-related, logging and delivery only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// APP_ENV; `production` selects webhook delivery
    pub app_env: String,
    /// PORT for the webhook listener
    pub port: u16,
    /// PUBLIC_URL, or derived from RENDER_APP_NAME
    pub public_url: Option<String>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env_or("PORT", DEFAULT_PORT);
        let public_url = env::var("PUBLIC_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                env::var("RENDER_APP_NAME")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .map(|name| format!("https://{}.onrender.com/", name.trim()))
            });

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            app_env,
            port,
            public_url,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Webhook in production, long polling otherwise.
    pub fn delivery_mode(&self) -> Result<DeliveryMode> {
        if !self.is_production() {
            return Ok(DeliveryMode::Polling);
        }
        let raw = self.public_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!("APP_ENV=production requires PUBLIC_URL or RENDER_APP_NAME")
        })?;
        let url = reqwest::Url::parse(raw)
            .map_err(|e| anyhow::anyhow!("PUBLIC_URL is not a valid URL ({}): {}", e, raw))?;
        let address = SocketAddr::from(([0, 0, 0, 0], self.port));
        Ok(DeliveryMode::Webhook { address, url })
    }

    /// Validate config (URLs well-formed, webhook settings complete).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        self.delivery_mode()?;
        Ok(())
    }
}
