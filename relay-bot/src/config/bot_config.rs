//! BotConfig: BaseConfig + RelayConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, DeliveryMode, RelayConfig};

/// Full bot config. Use BotConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub relay: RelayConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let relay = RelayConfig::from_env()?;
        Ok(Self { base, relay })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.relay.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn relay(&self) -> &RelayConfig {
        &self.relay
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn delivery_mode(&self) -> Result<DeliveryMode> {
        self.base.delivery_mode()
    }
}
