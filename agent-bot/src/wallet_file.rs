//! File-backed wallet persistence for the single-operator agent.
//!
//! The export payload is written as plaintext JSON; this is the agent demo's
//! trust model (one operator, local file), not the multi-user bot's, which
//! keeps records encrypted in the credential store.

use std::path::Path;

use tracing::info;
use wbot_core::{Result, Wallet, WalletBotError, WalletData, WalletSdk};

/// Imports the wallet from `path` if present, otherwise creates one on
/// `network_id`. The export payload is (re)written on every call so the file
/// always holds the current wallet.
pub async fn load_or_create(
    sdk: &dyn WalletSdk,
    network_id: &str,
    path: impl AsRef<Path>,
) -> Result<Wallet> {
    let path = path.as_ref();

    let wallet = if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let data: WalletData = serde_json::from_str(&raw)
            .map_err(|e| WalletBotError::Store(format!("corrupt wallet file: {}", e)))?;
        let wallet = sdk.import_wallet(&data).await?;
        info!(wallet_id = %wallet.id, path = %path.display(), "Imported wallet from file");
        wallet
    } else {
        let wallet = sdk.create_wallet(network_id).await?;
        info!(wallet_id = %wallet.id, network_id, "Created new wallet");
        wallet
    };

    let raw = serde_json::to_string(&wallet.data)
        .map_err(|e| WalletBotError::Store(format!("wallet data not serializable: {}", e)))?;
    std::fs::write(path, raw)?;

    Ok(wallet)
}
