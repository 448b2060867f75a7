//! HTTP wallet platform adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use wbot_core::{
    AssetBalance, Deployment, Result, TxReceipt, Wallet, WalletBotError, WalletData, WalletSdk,
};

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    amount: f64,
}

#[derive(Debug, Deserialize)]
struct ExportResponse {
    #[serde(rename = "privateKey")]
    private_key: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Wallet platform client. API credentials ride on every request as
/// headers; the platform waits for transaction completion server-side, so
/// transfer/trade responses already carry final receipts.
pub struct HttpWalletSdk {
    client: reqwest::Client,
    base_url: String,
    api_key_name: String,
    api_key_secret: String,
}

impl HttpWalletSdk {
    pub fn new(
        base_url: impl Into<String>,
        api_key_name: impl Into<String>,
        api_key_secret: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_name: api_key_name.into(),
            api_key_secret: api_key_secret.into(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("X-Api-Key-Name", &self.api_key_name)
            .bearer_auth(&self.api_key_secret)
    }

    /// Sends the request and decodes a JSON body, mapping non-success
    /// statuses to [`WalletBotError::Sdk`] with the platform's own message.
    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| WalletBotError::Sdk(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            debug!(%status, %message, "Platform call rejected");
            return Err(WalletBotError::Sdk(message));
        }

        response
            .json()
            .await
            .map_err(|e| WalletBotError::Sdk(format!("malformed response: {}", e)))
    }
}

#[async_trait]
impl WalletSdk for HttpWalletSdk {
    async fn create_wallet(&self, network_id: &str) -> Result<Wallet> {
        info!(network_id, "Creating wallet");
        self.send(
            self.request(reqwest::Method::POST, "/v1/wallets")
                .json(&json!({ "networkId": network_id })),
        )
        .await
    }

    async fn import_wallet(&self, data: &WalletData) -> Result<Wallet> {
        debug!(wallet_id = %data.wallet_id, "Importing wallet");
        self.send(
            self.request(reqwest::Method::POST, "/v1/wallets/import")
                .json(data),
        )
        .await
    }

    async fn balances(&self, wallet: &Wallet) -> Result<Vec<AssetBalance>> {
        self.send(self.request(
            reqwest::Method::GET,
            &format!("/v1/wallets/{}/balances", wallet.id),
        ))
        .await
    }

    async fn balance(&self, wallet: &Wallet, asset: &str) -> Result<f64> {
        let response: BalanceResponse = self
            .send(self.request(
                reqwest::Method::GET,
                &format!("/v1/wallets/{}/balances/{}", wallet.id, asset),
            ))
            .await?;
        Ok(response.amount)
    }

    async fn transfer(
        &self,
        wallet: &Wallet,
        amount: f64,
        asset: &str,
        to: &str,
    ) -> Result<TxReceipt> {
        info!(wallet_id = %wallet.id, amount, asset, to, "Submitting transfer");
        self.send(
            self.request(
                reqwest::Method::POST,
                &format!("/v1/wallets/{}/transfers", wallet.id),
            )
            .json(&json!({ "amount": amount, "asset": asset, "to": to })),
        )
        .await
    }

    async fn trade(
        &self,
        wallet: &Wallet,
        amount: f64,
        from_asset: &str,
        to_asset: &str,
    ) -> Result<TxReceipt> {
        info!(wallet_id = %wallet.id, amount, from_asset, to_asset, "Submitting trade");
        self.send(
            self.request(
                reqwest::Method::POST,
                &format!("/v1/wallets/{}/trades", wallet.id),
            )
            .json(&json!({
                "amount": amount,
                "fromAsset": from_asset,
                "toAsset": to_asset,
            })),
        )
        .await
    }

    async fn deploy_multi_token(&self, wallet: &Wallet, base_uri: &str) -> Result<Deployment> {
        info!(wallet_id = %wallet.id, base_uri, "Deploying multi-token contract");
        self.send(
            self.request(
                reqwest::Method::POST,
                &format!("/v1/wallets/{}/contracts/multi-token", wallet.id),
            )
            .json(&json!({ "baseUri": base_uri })),
        )
        .await
    }

    async fn faucet(&self, wallet: &Wallet) -> Result<TxReceipt> {
        info!(wallet_id = %wallet.id, "Requesting faucet funds");
        self.send(self.request(
            reqwest::Method::POST,
            &format!("/v1/wallets/{}/faucet", wallet.id),
        ))
        .await
    }

    async fn export_private_key(&self, wallet: &Wallet) -> Result<String> {
        info!(wallet_id = %wallet.id, "Exporting private key");
        let response: ExportResponse = self
            .send(self.request(
                reqwest::Method::GET,
                &format!("/v1/wallets/{}/export", wallet.id),
            ))
            .await?;
        Ok(response.private_key)
    }
}
