//! Update dispatcher: converts teloxide updates to core messages and feeds
//! them to the handler chain. Text messages and callback queries run through
//! the same chain.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::{CallbackQueryWrapper, TelegramMessageWrapper};
use crate::chain::HandlerChain;

/// Starts long polling with the given teloxide Bot and handler chain. Each
/// update is converted to a core message and handled in a spawned task so
/// polling is never blocked by an SDK call.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity confirmed");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn on_message(
    msg: teloxide::types::Message,
    chain: HandlerChain,
) -> std::result::Result<(), teloxide::RequestError> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        "Received message"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });

    Ok(())
}

async fn on_callback_query(
    bot: teloxide::Bot,
    q: teloxide::types::CallbackQuery,
    chain: HandlerChain,
) -> std::result::Result<(), teloxide::RequestError> {
    // Stop the client-side spinner first.
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(core_msg) = CallbackQueryWrapper(&q).to_core() else {
        info!("Callback query without message or data, ignoring");
        return Ok(());
    };
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        data = %core_msg.content,
        "Received callback query"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });

    Ok(())
}
