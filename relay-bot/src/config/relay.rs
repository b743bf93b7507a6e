//! Relay config: AI gateway endpoint, input limits and session lifecycle. Loaded from env.

use anyhow::Result;
use std::env;
use std::time::Duration;

use super::env_or;
use crate::router::RouterLimits;

pub const DEFAULT_AI_ENDPOINT: &str = "https://api.dreaded.site/api/chatgpt";

/// Largest TTL a `chrono::Duration` can hold (it counts milliseconds in an i64).
pub const MAX_SESSION_TTL_SECS: u64 = i64::MAX as u64 / 1000;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// AI_ENDPOINT
    pub ai_endpoint: String,
    /// AI_TIMEOUT_SECS
    pub ai_timeout_secs: u64,
    /// AI_CONTEXT_TURNS; 0 sends no context
    pub ai_context_turns: usize,
    /// MAX_MESSAGE_CHARS
    pub max_message_chars: usize,
    /// HISTORY_CAP
    pub history_cap: usize,
    /// SESSION_TTL_SECS
    pub session_ttl_secs: u64,
    /// SESSION_SWEEP_INTERVAL_SECS
    pub session_sweep_interval_secs: u64,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ai_endpoint: env::var("AI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_AI_ENDPOINT.to_string()),
            ai_timeout_secs: env_or("AI_TIMEOUT_SECS", ai_gateway::DEFAULT_TIMEOUT.as_secs()),
            ai_context_turns: env_or("AI_CONTEXT_TURNS", 0),
            max_message_chars: env_or("MAX_MESSAGE_CHARS", 1000),
            history_cap: env_or("HISTORY_CAP", 10),
            session_ttl_secs: env_or("SESSION_TTL_SECS", 30 * 60),
            session_sweep_interval_secs: env_or("SESSION_SWEEP_INTERVAL_SECS", 10 * 60),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.ai_endpoint).is_err() {
            anyhow::bail!("AI_ENDPOINT is not a valid URL: {}", self.ai_endpoint);
        }
        for (name, value) in [
            ("AI_TIMEOUT_SECS", self.ai_timeout_secs),
            ("MAX_MESSAGE_CHARS", self.max_message_chars as u64),
            ("HISTORY_CAP", self.history_cap as u64),
            ("SESSION_TTL_SECS", self.session_ttl_secs),
            ("SESSION_SWEEP_INTERVAL_SECS", self.session_sweep_interval_secs),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be greater than zero", name);
            }
        }
        if self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            anyhow::bail!(
                "SESSION_TTL_SECS must be at most {} (got {})",
                MAX_SESSION_TTL_SECS,
                self.session_ttl_secs
            );
        }
        Ok(())
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs.min(MAX_SESSION_TTL_SECS) as i64)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    pub fn router_limits(&self) -> RouterLimits {
        RouterLimits {
            max_message_chars: self.max_message_chars,
            history_cap: self.history_cap,
            context_turns: self.ai_context_turns,
        }
    }
}
