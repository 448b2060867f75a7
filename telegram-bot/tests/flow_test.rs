//! End-to-end handler-chain tests over in-memory fakes: real handlers, real
//! state machine, recorded outgoing messages, stub wallet platform.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storage::{Cipher, CredentialStore, MemoryKvStore};
use telegram_bot::{build_handler_chain, HandlerChain};
use wbot_core::{
    AssetBalance, Bot, Chat, Deployment, MenuButton, Message, MessageDirection, Result, TxReceipt,
    User, Wallet, WalletBotError, WalletData, WalletSdk,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Text(String),
    Markdown(String),
    Menu { text: String, rows: usize },
    ForceReply(String),
    Deleted(String),
    Pinned(String),
}

/// Records every outgoing call instead of talking to Telegram.
#[derive(Default)]
struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicUsize,
}

impl RecordingBot {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t) | Sent::ForceReply(t) | Sent::Markdown(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn last_text(&self) -> String {
        self.texts().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_markdown(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Markdown(text.to_string()));
        Ok(())
    }

    async fn send_menu(&self, _chat: &Chat, text: &str, rows: &[Vec<MenuButton>]) -> Result<()> {
        self.sent.lock().unwrap().push(Sent::Menu {
            text: text.to_string(),
            rows: rows.len(),
        });
        Ok(())
    }

    async fn send_force_reply(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::ForceReply(text.to_string()));
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn delete_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Deleted(message_id.to_string()));
        Ok(())
    }

    async fn pin_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Pinned(message_id.to_string()));
        Ok(())
    }
}

/// Stub platform with configurable balances and failure injection; counts
/// transfers and trades.
struct StubSdk {
    balances: Mutex<HashMap<String, f64>>,
    transfers: AtomicUsize,
    trades: AtomicUsize,
    last_trade: Mutex<Option<(f64, String, String)>>,
    fail_with: Mutex<Option<String>>,
}

impl StubSdk {
    fn with_balance(asset: &str, amount: f64) -> Self {
        let mut balances = HashMap::new();
        balances.insert(asset.to_string(), amount);
        Self {
            balances: Mutex::new(balances),
            transfers: AtomicUsize::new(0),
            trades: AtomicUsize::new(0),
            last_trade: Mutex::new(None),
            fail_with: Mutex::new(None),
        }
    }

    fn fail_next(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    fn transfers(&self) -> usize {
        self.transfers.load(Ordering::SeqCst)
    }

    fn trades(&self) -> usize {
        self.trades.load(Ordering::SeqCst)
    }

    fn receipt() -> TxReceipt {
        TxReceipt {
            transaction_hash: "0xhash".to_string(),
            transaction_link: "https://basescan.org/tx/0xhash".to_string(),
        }
    }

    fn take_failure(&self) -> Option<WalletBotError> {
        self.fail_with
            .lock()
            .unwrap()
            .take()
            .map(WalletBotError::Sdk)
    }
}

#[async_trait]
impl WalletSdk for StubSdk {
    async fn create_wallet(&self, network_id: &str) -> Result<Wallet> {
        let data = WalletData {
            wallet_id: "w-1".to_string(),
            seed: "seed".to_string(),
            network_id: network_id.to_string(),
        };
        Ok(Wallet {
            id: "w-1".to_string(),
            address: "0xabc123".to_string(),
            network_id: network_id.to_string(),
            data,
        })
    }

    async fn import_wallet(&self, data: &WalletData) -> Result<Wallet> {
        Ok(Wallet {
            id: data.wallet_id.clone(),
            address: "0xabc123".to_string(),
            network_id: data.network_id.clone(),
            data: data.clone(),
        })
    }

    async fn balances(&self, _wallet: &Wallet) -> Result<Vec<AssetBalance>> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .map(|(asset, amount)| AssetBalance {
                asset: asset.clone(),
                amount: *amount,
            })
            .collect())
    }

    async fn balance(&self, _wallet: &Wallet, asset: &str) -> Result<f64> {
        Ok(*self.balances.lock().unwrap().get(asset).unwrap_or(&0.0))
    }

    async fn transfer(
        &self,
        _wallet: &Wallet,
        _amount: f64,
        _asset: &str,
        _to: &str,
    ) -> Result<TxReceipt> {
        self.transfers.fetch_add(1, Ordering::SeqCst);
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(Self::receipt()),
        }
    }

    async fn trade(
        &self,
        _wallet: &Wallet,
        amount: f64,
        from_asset: &str,
        to_asset: &str,
    ) -> Result<TxReceipt> {
        self.trades.fetch_add(1, Ordering::SeqCst);
        *self.last_trade.lock().unwrap() =
            Some((amount, from_asset.to_string(), to_asset.to_string()));
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(Self::receipt()),
        }
    }

    async fn deploy_multi_token(&self, _wallet: &Wallet, _base_uri: &str) -> Result<Deployment> {
        unimplemented!("not part of the bot surface")
    }

    async fn faucet(&self, _wallet: &Wallet) -> Result<TxReceipt> {
        unimplemented!("not part of the bot surface")
    }

    async fn export_private_key(&self, _wallet: &Wallet) -> Result<String> {
        Ok("0xfeedface".to_string())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    bot: Arc<RecordingBot>,
    sdk: Arc<StubSdk>,
    chain: HandlerChain,
}

fn harness(sdk: StubSdk) -> Harness {
    let bot = Arc::new(RecordingBot::default());
    let sdk = Arc::new(sdk);
    let store = Arc::new(CredentialStore::new(
        Arc::new(MemoryKvStore::new()),
        Cipher::from_hex_key(&"22".repeat(32)).unwrap(),
        "base-mainnet",
    ));
    let chain = build_handler_chain(bot.clone(), sdk.clone(), store);
    Harness { bot, sdk, chain }
}

fn text_message(content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("tester".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 100,
            chat_type: "Private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: chrono::Utc::now(),
    }
}

fn callback(data: &str) -> Message {
    Message {
        message_type: "callback".to_string(),
        content: data.to_string(),
        id: "7".to_string(),
        ..text_message("")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_creates_wallet_and_shows_menu() {
    let h = harness(StubSdk::with_balance("eth", 1.0));
    h.chain.handle(&text_message("/start")).await.unwrap();

    let sent = h.bot.sent();
    assert_eq!(sent.len(), 1);
    match &sent[0] {
        Sent::Menu { text, rows } => {
            assert!(text.contains("Welcome to your Onchain Trading Bot!"));
            assert!(text.contains("0xabc123"));
            assert_eq!(*rows, 4);
        }
        other => panic!("expected menu, got {:?}", other),
    }
}

/// Withdraw amount 0 is rejected with the exact message and no transfer is
/// issued.
#[tokio::test]
async fn withdraw_zero_is_rejected_without_sdk_call() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("withdraw_eth")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "How much ETH would you like to withdraw?"
    );

    h.chain.handle(&text_message("0")).await.unwrap();
    assert_eq!(h.bot.last_text(), "Please enter a positive amount.");
    assert_eq!(h.sdk.transfers(), 0);
}

#[tokio::test]
async fn withdraw_happy_path() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("withdraw_eth")).await.unwrap();
    h.chain.handle(&text_message("0.5")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "Please enter the Ethereum address to withdraw to:"
    );

    let to = format!("0x{}", "cd".repeat(20));
    h.chain.handle(&text_message(&to)).await.unwrap();

    assert_eq!(h.sdk.transfers(), 1);
    let sent = h.bot.sent();
    assert!(sent.contains(&Sent::Text(
        "Waiting for withdrawal to complete...".to_string()
    )));
    assert!(sent.iter().any(|s| matches!(s, Sent::Deleted(_))));
    assert_eq!(
        h.bot.last_text(),
        "Withdrawal complete! Transaction link: https://basescan.org/tx/0xhash"
    );

    // Flow is done; further free text is ignored.
    let before = h.bot.sent().len();
    h.chain.handle(&text_message("anything")).await.unwrap();
    assert_eq!(h.bot.sent().len(), before);
}

#[tokio::test]
async fn withdraw_insufficient_balance_keeps_flow_alive() {
    let h = harness(StubSdk::with_balance("eth", 0.1));

    h.chain.handle(&callback("withdraw_eth")).await.unwrap();
    h.chain.handle(&text_message("0.5")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "Insufficient balance. Your current ETH balance is 0.1."
    );
    assert_eq!(h.sdk.transfers(), 0);

    // A smaller amount still works without restarting the flow.
    h.chain.handle(&text_message("0.05")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "Please enter the Ethereum address to withdraw to:"
    );
}

#[tokio::test]
async fn withdraw_invalid_address_reprompts() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("withdraw_eth")).await.unwrap();
    h.chain.handle(&text_message("0.5")).await.unwrap();
    h.chain.handle(&text_message("not-an-address")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "Invalid Ethereum address. Please enter a valid address."
    );
    assert_eq!(h.sdk.transfers(), 0);

    h.chain.handle(&text_message("vitalik.eth")).await.unwrap();
    assert_eq!(h.sdk.transfers(), 1);
}

#[tokio::test]
async fn withdraw_failure_surfaces_platform_message() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("withdraw_eth")).await.unwrap();
    h.chain.handle(&text_message("0.5")).await.unwrap();
    h.sdk.fail_next("Insufficient funds for gas");
    h.chain
        .handle(&text_message(&format!("0x{}", "ab".repeat(20))))
        .await
        .unwrap();

    assert_eq!(
        h.bot.last_text(),
        "Withdrawal failed: Insufficient funds for gas"
    );
}

#[tokio::test]
async fn buy_flow_trades_eth_into_asset() {
    let h = harness(StubSdk::with_balance("eth", 2.0));

    h.chain.handle(&callback("buy")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "How much ETH would you like to spend on the buy?"
    );

    h.chain.handle(&text_message("0.25")).await.unwrap();
    h.chain.handle(&text_message("degen")).await.unwrap();

    assert_eq!(h.sdk.trades(), 1);
    assert_eq!(
        *h.sdk.last_trade.lock().unwrap(),
        Some((0.25, "eth".to_string(), "degen".to_string()))
    );
    assert_eq!(
        h.bot.last_text(),
        "Buy successfully completed! Transaction link: https://basescan.org/tx/0xhash"
    );
}

#[tokio::test]
async fn sell_flow_checks_sold_asset_balance() {
    let h = harness(StubSdk::with_balance("degen", 50.0));

    h.chain.handle(&callback("sell")).await.unwrap();
    h.chain.handle(&text_message("degen")).await.unwrap();
    assert_eq!(h.bot.last_text(), "How much degen would you like to sell?");

    // More than held: rejected against the degen balance, not eth.
    h.chain.handle(&text_message("100")).await.unwrap();
    assert_eq!(
        h.bot.last_text(),
        "Insufficient balance. Your current degen balance is 50."
    );
    assert_eq!(h.sdk.trades(), 0);

    h.chain.handle(&text_message("10")).await.unwrap();
    assert_eq!(
        *h.sdk.last_trade.lock().unwrap(),
        Some((10.0, "degen".to_string(), "eth".to_string()))
    );
    assert_eq!(
        h.bot.last_text(),
        "Sell successfully completed! Transaction link: https://basescan.org/tx/0xhash"
    );
}

#[tokio::test]
async fn check_balance_lists_holdings() {
    let h = harness(StubSdk::with_balance("eth", 1.5));

    h.chain.handle(&callback("check_balance")).await.unwrap();
    let texts = h.bot.texts();
    assert_eq!(texts[0], "Your balances are as follows:");
    assert_eq!(texts[1], "eth: 1.5");
}

#[tokio::test]
async fn export_key_replies_in_markdown() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("export_key")).await.unwrap();
    let sent = h.bot.sent();
    assert!(sent.contains(&Sent::Markdown("`0xfeedface`".to_string())));
}

#[tokio::test]
async fn pin_message_pins_keyboard_message() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("pin_message")).await.unwrap();
    let sent = h.bot.sent();
    assert!(sent.contains(&Sent::Pinned("7".to_string())));
    assert_eq!(h.bot.last_text(), "Message pinned successfully!");
}

#[tokio::test]
async fn deposit_replies_with_address() {
    let h = harness(StubSdk::with_balance("eth", 1.0));

    h.chain.handle(&callback("deposit_eth")).await.unwrap();
    let texts = h.bot.texts();
    assert_eq!(
        texts[0],
        "Send your ETH to the following address on Base Mainnet:"
    );
    assert_eq!(texts[1], "0xabc123");
}
