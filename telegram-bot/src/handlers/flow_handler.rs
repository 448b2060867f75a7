//! Drives the withdraw/buy/sell conversations: feeds free text into the
//! state machine and performs the balance checks and SDK calls its
//! transitions ask for.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use storage::CredentialStore;
use tracing::{info, instrument, warn};
use wbot_core::{Bot, Chat, Handler, HandlerResponse, Message, Result, Wallet, WalletSdk};

use super::describe_error;
use crate::state::{on_text, AfterBalance, ConversationState, SdkCall, Transition};

pub struct FlowHandler {
    bot: Arc<dyn Bot>,
    sdk: Arc<dyn WalletSdk>,
    store: Arc<CredentialStore>,
    states: Arc<DashMap<i64, ConversationState>>,
}

impl FlowHandler {
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

    fn current_state(&self, chat_id: i64) -> ConversationState {
        self.states
            .get(&chat_id)
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    async fn wallet_for(&self, message: &Message) -> Result<Wallet> {
        let user_id = message.user.id.to_string();
        self.store.get_or_create(&user_id, self.sdk.as_ref()).await
    }

    /// Sends the waiting placeholder, runs the platform call, deletes the
    /// placeholder, reports the outcome, and resets the conversation.
    async fn execute(&self, chat: &Chat, wallet: &Wallet, call: SdkCall) -> Result<()> {
        let waiting_id = self
            .bot
            .send_message_and_return_id(chat, call.waiting_message())
            .await?;

        let result = match &call {
            SdkCall::Withdraw { amount, to } => {
                self.sdk.transfer(wallet, *amount, "eth", to).await
            }
            SdkCall::Buy { amount, asset } => self.sdk.trade(wallet, *amount, "eth", asset).await,
            SdkCall::Sell { amount, asset } => self.sdk.trade(wallet, *amount, asset, "eth").await,
        };

        if let Err(e) = self.bot.delete_message(chat, &waiting_id).await {
            warn!(error = %e, "Failed to delete waiting message");
        }

        let reply = match result {
            Ok(receipt) => call.success_message(&receipt.transaction_link),
            Err(e) => call.failure_message(&describe_error(&e)),
        };
        self.bot.send_message(chat, &reply).await?;

        self.states.insert(chat.id, ConversationState::Idle);
        Ok(())
    }

    async fn after_balance(&self, message: &Message, wallet: &Wallet, then: AfterBalance) -> Result<()> {
        match then {
            AfterBalance::Prompt { reply, next } => {
                self.states.insert(message.chat.id, next);
                self.bot.send_force_reply(&message.chat, &reply).await
            }
            AfterBalance::Execute { call } => self.execute(&message.chat, wallet, call).await,
        }
    }
}

#[async_trait]
impl Handler for FlowHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_callback() || message.content.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }

        let state = self.current_state(message.chat.id);
        match on_text(&state, &message.content) {
            Transition::None => Ok(HandlerResponse::Continue),

            Transition::Reject { reply } => {
                self.bot.send_message(&message.chat, &reply).await?;
                Ok(HandlerResponse::Stop)
            }

            Transition::Prompt { reply, next } => {
                self.states.insert(message.chat.id, next);
                self.bot.send_force_reply(&message.chat, &reply).await?;
                Ok(HandlerResponse::Stop)
            }

            Transition::RequireBalance {
                asset,
                display,
                amount,
                then,
            } => {
                let outcome = async {
                    let wallet = self.wallet_for(message).await?;
                    let balance = self.sdk.balance(&wallet, &asset).await?;
                    Ok::<_, wbot_core::WalletBotError>((wallet, balance))
                }
                .await;

                let (wallet, balance) = match outcome {
                    Ok(pair) => pair,
                    Err(e) => {
                        self.bot
                            .send_message(&message.chat, &format!("Error: {}", describe_error(&e)))
                            .await?;
                        return Ok(HandlerResponse::Stop);
                    }
                };

                if amount > balance {
                    info!(
                        user_id = message.user.id,
                        asset, amount, balance, "Rejected for insufficient balance"
                    );
                    self.bot
                        .send_message(
                            &message.chat,
                            &format!(
                                "Insufficient balance. Your current {} balance is {}.",
                                display, balance
                            ),
                        )
                        .await?;
                    return Ok(HandlerResponse::Stop);
                }

                self.after_balance(message, &wallet, then).await?;
                Ok(HandlerResponse::Stop)
            }

            Transition::Execute { call } => {
                let wallet = match self.wallet_for(message).await {
                    Ok(wallet) => wallet,
                    Err(e) => {
                        self.bot
                            .send_message(&message.chat, &format!("Error: {}", describe_error(&e)))
                            .await?;
                        return Ok(HandlerResponse::Stop);
                    }
                };
                self.execute(&message.chat, &wallet, call).await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
