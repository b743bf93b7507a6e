//! Dispatcher runner: message and callback-query branches feed the handler chain, one spawned task per
//! update. Delivery is long polling or a webhook served by axum.

use std::sync::Arc;

use anyhow::Result;
use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::update_listeners::webhooks;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::chain::HandlerChain;
use crate::config::DeliveryMode;
use crate::core::{Bot as CoreBot, Message as CoreMessage, ToCoreMessage};
use crate::router::Command;

/// Shared by every dispatcher endpoint.
struct UpdateContext {
    chain: HandlerChain,
    bot: Arc<dyn CoreBot>,
}

impl UpdateContext {
    fn spawn(self: &Arc<Self>, message: CoreMessage) {
        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            crate::runner::process_message(&ctx.chain, ctx.bot.as_ref(), &message).await;
        });
    }
}

async fn on_message(msg: teloxide::types::Message, ctx: Arc<UpdateContext>) -> ResponseResult<()> {
    ctx.spawn(TelegramMessageWrapper(&msg).to_core());
    Ok(())
}

async fn on_callback(
    bot: teloxide::Bot,
    query: CallbackQuery,
    ctx: Arc<UpdateContext>,
) -> ResponseResult<()> {
    // Stop the client-side spinner before any slow work.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }
    ctx.spawn(TelegramCallbackWrapper(&query).to_core());
    Ok(())
}

/// Publishes the command menu shown by Telegram clients.
pub async fn register_commands(bot: &teloxide::Bot) -> Result<()> {
    let commands = Command::descriptions()
        .into_iter()
        .map(|(command, description)| BotCommand::new(command, description));
    bot.set_my_commands(commands).await?;
    Ok(())
}

/// Runs the dispatcher until SIGINT/SIGTERM.
#[instrument(skip(bot, handler_chain, core_bot))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    core_bot: Arc<dyn CoreBot>,
    delivery: DeliveryMode,
) -> Result<()> {
    let ctx = Arc::new(UpdateContext {
        chain: handler_chain,
        bot: core_bot,
    });

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![ctx])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build();

    spawn_sigterm_listener(dispatcher.shutdown_token());

    match delivery {
        DeliveryMode::Polling => {
            if let Err(e) = bot.delete_webhook().await {
                warn!(error = %e, "Failed to delete webhook (continuing anyway)");
            }
            info!("Starting dispatcher with long polling");
            dispatcher.dispatch().await;
        }
        DeliveryMode::Webhook { address, url } => {
            info!(%address, url = %url, "Starting dispatcher with webhook");
            let listener = webhooks::axum(bot, webhooks::Options::new(address, url))
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to set up webhook");
                    anyhow::anyhow!("Failed to set up webhook: {}", e)
                })?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Error from the update listener"),
                )
                .await;
        }
    }

    info!("Dispatcher stopped");
    Ok(())
}

#[cfg(unix)]
fn spawn_sigterm_listener(token: teloxide::dispatching::ShutdownToken) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM");
                return;
            }
        };
        if term.recv().await.is_some() {
            info!("SIGTERM received, shutting down dispatcher");
            match token.shutdown() {
                Ok(done) => done.await,
                Err(e) => warn!(error = ?e, "Dispatcher was not running"),
            }
        }
    });
}

#[cfg(not(unix))]
fn spawn_sigterm_listener(_token: teloxide::dispatching::ShutdownToken) {}
