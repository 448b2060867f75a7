//! Handles /start: ensures the user has a wallet and shows the action menu.

use std::sync::Arc;

use async_trait::async_trait;
use storage::CredentialStore;
use tracing::{info, instrument, warn};
use wbot_core::{Bot, Handler, HandlerResponse, MenuButton, Message, Result, WalletSdk};

use super::describe_error;

/// Replies to /start with the welcome message and inline keyboard. Creates
/// the user's wallet on first contact via the credential store.
pub struct MenuHandler {
    bot: Arc<dyn Bot>,
    sdk: Arc<dyn WalletSdk>,
    store: Arc<CredentialStore>,
}

impl MenuHandler {
    pub fn new(bot: Arc<dyn Bot>, sdk: Arc<dyn WalletSdk>, store: Arc<CredentialStore>) -> Self {
        Self { bot, sdk, store }
    }

    fn menu_rows() -> Vec<Vec<MenuButton>> {
        vec![
            vec![
                MenuButton::new("Check Balance", "check_balance"),
                MenuButton::new("Deposit ETH", "deposit_eth"),
            ],
            vec![
                MenuButton::new("Withdraw ETH", "withdraw_eth"),
                MenuButton::new("Buy", "buy"),
            ],
            vec![
                MenuButton::new("Sell", "sell"),
                MenuButton::new("Export Key", "export_key"),
            ],
            vec![MenuButton::new("Pin message", "pin_message")],
        ]
    }
}

#[async_trait]
impl Handler for MenuHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_callback() || message.content.trim() != "/start" {
            return Ok(HandlerResponse::Continue);
        }

        let user_id = message.user.id.to_string();
        info!(user_id = message.user.id, "Handling /start");

        let wallet = match self.store.get_or_create(&user_id, self.sdk.as_ref()).await {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!(user_id = message.user.id, error = %e, "Failed to get or create wallet");
                self.bot
                    .send_message(&message.chat, &format!("Error: {}", describe_error(&e)))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        let text = format!(
            "Welcome to your Onchain Trading Bot!\n\
             Your Base address is {}\n\
             Select an option below:",
            wallet.address
        );
        self.bot
            .send_menu(&message.chat, &text, &Self::menu_rows())
            .await?;
        Ok(HandlerResponse::Stop)
    }
}
