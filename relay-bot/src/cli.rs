//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Telegram AI relay bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: `run --token X` parses into Commands::Run with the token.**
    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["relay-bot", "run", "--token", "abc"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert_eq!(token.as_deref(), Some("abc")),
        }
    }

    /// **Test: `run` without a token leaves it to BOT_TOKEN.**
    #[test]
    fn test_parse_run_without_token() {
        let cli = Cli::try_parse_from(["relay-bot", "run"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert!(token.is_none()),
        }
    }
}
