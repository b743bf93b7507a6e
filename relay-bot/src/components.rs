//! Component factory: builds BotComponents from config. Keeps assembly out of the runner.

use std::sync::Arc;

use ai_gateway::{AiGateway, HttpGateway};
use anyhow::Result;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{LoggingHandler, RouterHandler, SessionHandler};
use crate::router::CommandRouter;
use crate::session::SessionStore;
use crate::telegram::TelegramBotAdapter;

/// Everything the runner and the handler chain share.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Outbound side used by handlers; the Telegram adapter unless overridden.
    pub bot: Arc<dyn CoreBot>,
    pub sessions: SessionStore,
    pub router: Arc<CommandRouter>,
}

fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds components. Overrides replace the HTTP gateway or the Telegram-backed Bot (tests).
#[instrument(skip(config, gateway_override, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    gateway_override: Option<Arc<dyn AiGateway>>,
    bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let relay = config.relay();
    let teloxide_bot = build_teloxide_bot(config);

    let gateway: Arc<dyn AiGateway> = match gateway_override {
        Some(gateway) => gateway,
        None => {
            info!(
                endpoint = %relay.ai_endpoint,
                timeout_secs = relay.ai_timeout_secs,
                "Using HTTP AI gateway"
            );
            Arc::new(
                HttpGateway::new(relay.ai_endpoint.clone(), relay.ai_timeout()).map_err(|e| {
                    error!(error = %e, "Failed to build AI gateway client");
                    anyhow::anyhow!("Failed to build AI gateway client: {}", e)
                })?,
            )
        }
    };

    let bot: Arc<dyn CoreBot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let router = Arc::new(CommandRouter::new(gateway, relay.router_limits()));

    Ok(BotComponents {
        teloxide_bot,
        bot,
        sessions: SessionStore::new(),
        router,
    })
}

/// Builds the handler chain (logging → session activity → command router).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(SessionHandler::new(components.sessions.clone())))
        .add_handler(Arc::new(RouterHandler::new(
            components.router.clone(),
            components.sessions.clone(),
            components.bot.clone(),
        )))
}
