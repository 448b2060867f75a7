//! Black-box SDK boundaries: the blockchain wallet platform and the
//! social-media API.
//!
//! Both are opaque external collaborators; the traits here are the seam the
//! bots call through. The HTTP adapters live in sdk-client, mocks in tests.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Exported wallet payload, the unit the credential store encrypts and
/// persists. Canonical encoding is compact JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletData {
    #[serde(rename = "walletId")]
    pub wallet_id: String,
    pub seed: String,
    #[serde(rename = "networkId")]
    pub network_id: String,
}

/// Live wallet handle returned by create/import. Carries its export payload
/// so callers can persist it without a second SDK round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub address: String,
    pub network_id: String,
    pub data: WalletData,
}

/// One asset balance line as reported by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub amount: f64,
}

/// Receipt for a completed transfer or trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub transaction_link: String,
}

/// Result of a contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub contract_address: String,
}

/// Blockchain wallet platform boundary. Every method is one remote call;
/// failures surface as [`WalletBotError::Sdk`] with the platform's message
/// verbatim, never retried here.
///
/// [`WalletBotError::Sdk`]: crate::error::WalletBotError::Sdk
#[async_trait]
pub trait WalletSdk: Send + Sync {
    /// Creates a fresh wallet on the given network.
    async fn create_wallet(&self, network_id: &str) -> Result<Wallet>;

    /// Imports a previously exported wallet payload, returning a live handle.
    async fn import_wallet(&self, data: &WalletData) -> Result<Wallet>;

    /// All asset balances held by the wallet.
    async fn balances(&self, wallet: &Wallet) -> Result<Vec<AssetBalance>>;

    /// Balance of a single asset (0 when the wallet holds none).
    async fn balance(&self, wallet: &Wallet, asset: &str) -> Result<f64>;

    /// Transfers `amount` of `asset` to `to`, waiting for completion.
    async fn transfer(&self, wallet: &Wallet, amount: f64, asset: &str, to: &str)
        -> Result<TxReceipt>;

    /// Trades `amount` of `from_asset` into `to_asset`, waiting for
    /// completion.
    async fn trade(
        &self,
        wallet: &Wallet,
        amount: f64,
        from_asset: &str,
        to_asset: &str,
    ) -> Result<TxReceipt>;

    /// Deploys a multi-token (ERC-1155) contract with the given metadata
    /// base URI.
    async fn deploy_multi_token(&self, wallet: &Wallet, base_uri: &str) -> Result<Deployment>;

    /// Requests testnet funds from the faucet (testnet networks only).
    async fn faucet(&self, wallet: &Wallet) -> Result<TxReceipt>;

    /// Exports the wallet's private key as a hex string.
    async fn export_private_key(&self, wallet: &Wallet) -> Result<String>;
}

/// Social-media API boundary (post + account lookup are all the agent
/// toolkit needs).
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Publishes a post and returns its id.
    async fn post_update(&self, text: &str) -> Result<String>;

    /// Human-readable details of the authenticated account.
    async fn account_details(&self) -> Result<String>;
}
