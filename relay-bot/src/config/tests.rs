//! Config tests.

use crate::config::relay::MAX_SESSION_TTL_SECS;
use crate::config::{BotConfig, DeliveryMode};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "APP_ENV",
    "PORT",
    "PUBLIC_URL",
    "RENDER_APP_NAME",
    "AI_ENDPOINT",
    "AI_TIMEOUT_SECS",
    "AI_CONTEXT_TURNS",
    "MAX_MESSAGE_CHARS",
    "HISTORY_CAP",
    "SESSION_TTL_SECS",
    "SESSION_SWEEP_INTERVAL_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/relay-bot.log");
    assert_eq!(config.base().port, 3000);
    assert!(!config.base().is_production());
    assert!(config.base().public_url.is_none());
    let relay = config.relay();
    assert_eq!(relay.ai_endpoint, "https://api.dreaded.site/api/chatgpt");
    assert_eq!(relay.ai_timeout_secs, 30);
    assert_eq!(relay.ai_context_turns, 0);
    assert_eq!(relay.max_message_chars, 1000);
    assert_eq!(relay.history_cap, 10);
    assert_eq!(relay.session_ttl_secs, 1800);
    assert_eq!(relay.session_sweep_interval_secs, 600);
    assert_eq!(config.delivery_mode().unwrap(), DeliveryMode::Polling);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("LOG_FILE", "/tmp/relay.log");
    env::set_var("AI_ENDPOINT", "http://localhost:9000/chat");
    env::set_var("AI_TIMEOUT_SECS", "5");
    env::set_var("AI_CONTEXT_TURNS", "3");
    env::set_var("MAX_MESSAGE_CHARS", "500");
    env::set_var("HISTORY_CAP", "4");
    env::set_var("SESSION_TTL_SECS", "60");
    env::set_var("SESSION_SWEEP_INTERVAL_SECS", "15");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.log_file(), "/tmp/relay.log");
    let limits = config.relay().router_limits();
    assert_eq!(limits.max_message_chars, 500);
    assert_eq!(limits.history_cap, 4);
    assert_eq!(limits.context_turns, 3);
    assert_eq!(config.relay().ai_timeout().as_secs(), 5);
    assert_eq!(config.relay().session_ttl().num_seconds(), 60);
    assert_eq!(config.relay().session_sweep_interval().as_secs(), 15);
    assert_eq!(config.relay().ai_endpoint, "http://localhost:9000/chat");

    clear_env();
}

#[test]
#[serial]
fn test_unparsable_numbers_fall_back_to_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("PORT", "eighty");
    env::set_var("HISTORY_CAP", "-1");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.base().port, 3000);
    assert_eq!(config.relay().history_cap, 10);

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");

    let config = BotConfig::load(Some("override_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "override_token");
}

#[test]
#[serial]
fn test_missing_token_is_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_production_uses_webhook_from_render_name() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("APP_ENV", "production");
    env::set_var("PORT", "8443");
    env::set_var("RENDER_APP_NAME", "my-relay");

    let config = BotConfig::load(None).unwrap();

    match config.delivery_mode().unwrap() {
        DeliveryMode::Webhook { address, url } => {
            assert_eq!(address.port(), 8443);
            assert_eq!(url.as_str(), "https://my-relay.onrender.com/");
        }
        other => panic!("expected webhook, got {:?}", other),
    }

    clear_env();
}

#[test]
#[serial]
fn test_public_url_takes_precedence() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("APP_ENV", "Production");
    env::set_var("PUBLIC_URL", "https://bot.example.com/hook");
    env::set_var("RENDER_APP_NAME", "ignored");

    let config = BotConfig::load(None).unwrap();

    assert!(matches!(
        config.delivery_mode().unwrap(),
        DeliveryMode::Webhook { ref url, .. } if url.as_str() == "https://bot.example.com/hook"
    ));

    clear_env();
}

#[test]
#[serial]
fn test_validate_production_without_public_url() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("APP_ENV", "production");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_zero_limits() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("SESSION_SWEEP_INTERVAL_SECS", "0");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_endpoint() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("AI_ENDPOINT", "api.example.com/chat");

    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_ttl_beyond_duration_range() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("SESSION_TTL_SECS", u64::MAX.to_string());

    let config = BotConfig::load(None).unwrap();
    assert_eq!(config.relay().session_ttl_secs, u64::MAX);
    assert!(config.validate().is_err());
    // Still a positive, non-panicking TTL if validation is skipped.
    assert!(config.relay().session_ttl() > chrono::Duration::zero());

    env::set_var("SESSION_TTL_SECS", MAX_SESSION_TTL_SECS.to_string());
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(
        config.relay().session_ttl(),
        chrono::Duration::seconds(MAX_SESSION_TTL_SECS as i64)
    );

    clear_env();
}
