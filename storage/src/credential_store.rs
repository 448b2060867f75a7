//! Per-user wallet credential persistence.
//!
//! Each user maps to one encrypted record holding the wallet export payload.
//! The store owns the cipher and the key-value backend; callers only see
//! live [`Wallet`] handles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wbot_core::{Result, Wallet, WalletBotError, WalletData, WalletSdk};

use crate::cipher::{Cipher, Iv};
use crate::kv::KvStore;

/// Persisted shape of one credential row: base64 ciphertext plus the hex iv
/// that encrypted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub encrypted: String,
    pub iv: String,
}

/// Encrypted credential store keyed by user id.
pub struct CredentialStore {
    kv: Arc<dyn KvStore>,
    cipher: Cipher,
    network_id: String,
}

impl CredentialStore {
    pub fn new(kv: Arc<dyn KvStore>, cipher: Cipher, network_id: impl Into<String>) -> Self {
        Self {
            kv,
            cipher,
            network_id: network_id.into(),
        }
    }

    /// Returns the user's wallet, creating and persisting one on first use.
    ///
    /// On a hit the stored record is decrypted and re-imported through the
    /// SDK; nothing is written back. On a miss a wallet is created on the
    /// configured network and its export payload is encrypted under a fresh
    /// iv before the single write. Two concurrent first calls for the same
    /// user may both create a wallet; the later write wins and becomes the
    /// user's wallet from then on.
    pub async fn get_or_create(&self, user_id: &str, sdk: &dyn WalletSdk) -> Result<Wallet> {
        if let Some(raw) = self.kv.get(user_id).await? {
            return self.restore(user_id, &raw, sdk).await;
        }

        info!(user_id, network_id = %self.network_id, "No stored wallet, creating one");
        let wallet = sdk.create_wallet(&self.network_id).await?;

        let payload = serde_json::to_value(&wallet.data)
            .map_err(|e| WalletBotError::Store(format!("wallet data not serializable: {}", e)))?;
        let iv = Iv::generate();
        let encrypted = self.cipher.encrypt(&payload, &iv)?;

        let record = CredentialRecord {
            encrypted,
            iv: iv.to_hex(),
        };
        let raw = serde_json::to_string(&record)
            .map_err(|e| WalletBotError::Store(format!("record not serializable: {}", e)))?;
        self.kv.put(user_id, &raw).await?;

        info!(user_id, wallet_id = %wallet.id, "Wallet created and stored");
        Ok(wallet)
    }

    async fn restore(&self, user_id: &str, raw: &str, sdk: &dyn WalletSdk) -> Result<Wallet> {
        let record: CredentialRecord = serde_json::from_str(raw).map_err(|e| {
            warn!(user_id, "Stored credential record is malformed");
            WalletBotError::Store(format!("corrupt credential record: {}", e))
        })?;

        let iv = Iv::from_hex(&record.iv)?;
        let payload = self.cipher.decrypt(&record.encrypted, &iv)?;
        let data: WalletData = serde_json::from_value(payload)
            .map_err(|e| WalletBotError::Store(format!("corrupt wallet payload: {}", e)))?;

        let wallet = sdk.import_wallet(&data).await?;
        info!(user_id, wallet_id = %wallet.id, "Wallet restored from store");
        Ok(wallet)
    }
}
