//! Dispatches inline-keyboard presses. One-shot actions run their SDK call
//! directly; withdraw/buy/sell enter the conversation state machine and the
//! follow-up text is handled by the flow handler.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use storage::CredentialStore;
use tracing::{info, instrument, warn};
use wbot_core::{Bot, Handler, HandlerResponse, Message, Result, WalletSdk};

use super::describe_error;
use crate::state::{begin, FlowCommand};
use crate::state::ConversationState;

pub struct ButtonHandler {
    bot: Arc<dyn Bot>,
    sdk: Arc<dyn WalletSdk>,
    store: Arc<CredentialStore>,
    states: Arc<DashMap<i64, ConversationState>>,
}

impl ButtonHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        sdk: Arc<dyn WalletSdk>,
        store: Arc<CredentialStore>,
        states: Arc<DashMap<i64, ConversationState>>,
    ) -> Self {
        Self {
            bot,
            sdk,
            store,
            states,
        }
    }

    async fn check_balance(&self, message: &Message) -> Result<()> {
        self.bot
            .send_message(&message.chat, "Your balances are as follows:")
            .await?;

        let user_id = message.user.id.to_string();
        let result = async {
            let wallet = self.store.get_or_create(&user_id, self.sdk.as_ref()).await?;
            self.sdk.balances(&wallet).await
        }
        .await;

        match result {
            Ok(balances) => {
                let text = if balances.is_empty() {
                    "No balances.".to_string()
                } else {
                    balances
                        .iter()
                        .map(|b| format!("{}: {}", b.asset, b.amount))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                self.bot.send_message(&message.chat, &text).await
            }
            Err(e) => {
                self.bot
                    .send_message(
                        &message.chat,
                        &format!("Error retrieving balances: {}", describe_error(&e)),
                    )
                    .await
            }
        }
    }

    async fn deposit(&self, message: &Message) -> Result<()> {
        self.bot
            .send_message(
                &message.chat,
                "Send your ETH to the following address on Base Mainnet:",
            )
            .await?;

        let user_id = message.user.id.to_string();
        match self.store.get_or_create(&user_id, self.sdk.as_ref()).await {
            Ok(wallet) => self.bot.send_message(&message.chat, &wallet.address).await,
            Err(e) => {
                self.bot
                    .send_message(
                        &message.chat,
                        &format!("Error retrieving deposit address: {}", describe_error(&e)),
                    )
                    .await
            }
        }
    }

    async fn export_key(&self, message: &Message) -> Result<()> {
        self.bot
            .send_message(
                &message.chat,
                "The following contains your private key. Keep it somewhere private \
                 and do not share it with anyone.",
            )
            .await?;

        let user_id = message.user.id.to_string();
        let result = async {
            let wallet = self.store.get_or_create(&user_id, self.sdk.as_ref()).await?;
            self.sdk.export_private_key(&wallet).await
        }
        .await;

        match result {
            Ok(private_key) => {
                self.bot
                    .send_markdown(&message.chat, &format!("`{}`", private_key))
                    .await
            }
            Err(e) => {
                self.bot
                    .send_message(
                        &message.chat,
                        &format!("Error exporting private key: {}", describe_error(&e)),
                    )
                    .await
            }
        }
    }

    async fn pin(&self, message: &Message) -> Result<()> {
        // For callbacks, message.id is the id of the message carrying the
        // keyboard, which is what gets pinned.
        match self.bot.pin_message(&message.chat, &message.id).await {
            Ok(()) => {
                self.bot
                    .send_message(&message.chat, "Message pinned successfully!")
                    .await
            }
            Err(e) => {
                self.bot
                    .send_message(
                        &message.chat,
                        &format!("Failed to pin message: {}", describe_error(&e)),
                    )
                    .await
            }
        }
    }

    async fn enter_flow(&self, message: &Message, command: FlowCommand) -> Result<()> {
        let (next, prompt) = begin(command);
        self.states.insert(message.chat.id, next);
        self.bot.send_force_reply(&message.chat, prompt).await
    }
}

#[async_trait]
impl Handler for ButtonHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_callback() {
            return Ok(HandlerResponse::Continue);
        }

        info!(
            user_id = message.user.id,
            data = %message.content,
            "Handling button press"
        );

        match message.content.as_str() {
            "check_balance" => self.check_balance(message).await?,
            "deposit_eth" => self.deposit(message).await?,
            "withdraw_eth" => self.enter_flow(message, FlowCommand::Withdraw).await?,
            "buy" => self.enter_flow(message, FlowCommand::Buy).await?,
            "sell" => self.enter_flow(message, FlowCommand::Sell).await?,
            "export_key" => self.export_key(message).await?,
            "pin_message" => self.pin(message).await?,
            other => {
                warn!(data = %other, "Unknown callback data");
                self.bot
                    .send_message(&message.chat, &format!("You selected {}", other))
                    .await?;
            }
        }

        Ok(HandlerResponse::Stop)
    }
}
