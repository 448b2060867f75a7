//! Wires config, storage, SDK client, handlers, and the dispatcher into a
//! running bot.

use std::sync::Arc;

use anyhow::{Context, Result};
use dashmap::DashMap;
use sdk_client::HttpWalletSdk;
use storage::{Cipher, CredentialStore, SqliteKvStore};
use tracing::info;
use wbot_core::{init_tracing, Bot, WalletSdk};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::handlers::{ButtonHandler, FlowHandler, MenuHandler};
use crate::state::ConversationState;
use crate::telegram::{run_dispatcher, TelegramBotAdapter};

/// Builds the handler chain over the given transport and SDK. Split out so
/// tests can run the exact production chain against in-memory fakes.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    sdk: Arc<dyn WalletSdk>,
    store: Arc<CredentialStore>,
) -> HandlerChain {
    let states: Arc<DashMap<i64, ConversationState>> = Arc::new(DashMap::new());

    HandlerChain::new()
        .add_handler(Arc::new(MenuHandler::new(
            bot.clone(),
            sdk.clone(),
            store.clone(),
        )))
        .add_handler(Arc::new(ButtonHandler::new(
            bot.clone(),
            sdk.clone(),
            store.clone(),
            states.clone(),
        )))
        .add_handler(Arc::new(FlowHandler::new(bot, sdk, store, states)))
}

/// Runs the bot until interrupted: opens the credential database, builds the
/// SDK client and handler chain, and starts long polling.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    init_tracing(&config.log_file)?;
    info!(network_id = %config.network_id, "Starting wallet bot");

    let kv = Arc::new(
        SqliteKvStore::new(&config.database_url)
            .await
            .context("failed to open credential database")?,
    );
    let cipher =
        Cipher::from_hex_key(&config.encryption_key).context("invalid ENCRYPTION_KEY")?;
    let store = Arc::new(CredentialStore::new(kv, cipher, config.network_id.clone()));

    let sdk: Arc<dyn WalletSdk> = Arc::new(HttpWalletSdk::new(
        config.sdk_base_url.clone(),
        config.api_key_name.clone(),
        config.api_key_secret.clone(),
    ));

    let telegram = teloxide::Bot::new(config.bot_token.clone());
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(telegram.clone()));

    let chain = build_handler_chain(adapter, sdk, store);
    run_dispatcher(telegram, chain).await
}
