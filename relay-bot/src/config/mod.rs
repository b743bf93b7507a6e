//! Bot configuration: BaseConfig (Telegram + log + delivery) + RelayConfig (gateway, limits, sessions).

mod base;
mod bot_config;
mod relay;

#[cfg(test)]
mod tests;

pub use base::{BaseConfig, DeliveryMode};
pub use bot_config::BotConfig;
pub use relay::RelayConfig;

use std::env;
use std::str::FromStr;

/// Reads and parses an env var; falls back to `default` when unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
