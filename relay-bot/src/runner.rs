use std::sync::Arc;

use ai_gateway::AiGateway;
use anyhow::Result;
use tracing::{error, info, instrument, warn};

use crate::chain::HandlerChain;
use crate::components::{build_bot_components, build_handler_chain, BotComponents};
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot, HandlerResponse, Message};
use crate::router::replies::MSG_HANDLER_FAILED;
use crate::telegram::{register_commands, run_dispatcher};

/// RelayBot: config, components, and handler chain.
pub struct RelayBot {
    pub config: BotConfig,
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl RelayBot {
    pub fn new(config: BotConfig) -> Result<Self> {
        Self::with_overrides(config, None, None)
    }

    /// Builds the bot with an injected gateway and/or outbound Bot (tests).
    pub fn with_overrides(
        config: BotConfig,
        gateway: Option<Arc<dyn AiGateway>>,
        bot: Option<Arc<dyn Bot>>,
    ) -> Result<Self> {
        let components = build_bot_components(&config, gateway, bot)?;
        let handler_chain = build_handler_chain(&components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Drive handler chain with core Message (for integration tests).
    #[doc(hidden)]
    pub async fn handle_core_message(&self, message: &Message) -> Option<HandlerResponse> {
        process_message(&self.handler_chain, self.components.bot.as_ref(), message).await
    }
}

/// Runs one update through the chain. Failures are logged and answered with a generic apology;
/// they never propagate to the dispatcher.
#[instrument(skip_all, fields(user_id = message.user.id, chat_id = message.chat.id))]
pub async fn process_message(
    chain: &HandlerChain,
    bot: &dyn Bot,
    message: &Message,
) -> Option<HandlerResponse> {
    info!(message_id = %message.id, "step: processing update (handler chain started)");
    match chain.handle(message).await {
        Ok(response) => Some(response),
        Err(e) => {
            error!(error = %e, "Handler chain failed");
            if let Err(send_err) = bot.send_message(&message.chat, MSG_HANDLER_FAILED).await {
                error!(error = %send_err, "Failed to send error reply");
            }
            None
        }
    }
}

/// Main entry: validate config, init logging, build components, start the sweeper, then dispatch
/// updates until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let delivery = config.delivery_mode()?;
    let relay = config.relay();
    info!(
        ai_endpoint = %relay.ai_endpoint,
        delivery = ?delivery,
        session_ttl_secs = relay.session_ttl_secs,
        "Initializing bot"
    );

    let bot = RelayBot::new(config)?;
    let components = bot.components.clone();

    let sweeper = components.sessions.spawn_sweeper(
        bot.config.relay().session_sweep_interval(),
        bot.config.relay().session_ttl(),
    );

    if let Err(e) = register_commands(&components.teloxide_bot).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot started successfully");
    let result = run_dispatcher(
        components.teloxide_bot.clone(),
        bot.handler_chain.clone(),
        components.bot.clone(),
        delivery,
    )
    .await;

    sweeper.abort();
    info!(sessions = components.sessions.len().await, "Bot stopped");
    result
}
