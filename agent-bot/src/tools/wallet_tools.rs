//! Wallet platform tools: balances, transfers, trades, faucet, wallet
//! details, and multi-token deployment.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use wbot_core::{Wallet, WalletSdk};

use super::{required_amount, required_str, Tool, ToolError, ToolSpec};

/// Builds the full wallet toolkit over one wallet handle.
pub fn wallet_toolkit(sdk: Arc<dyn WalletSdk>, wallet: Arc<Wallet>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(GetWalletDetails {
            wallet: wallet.clone(),
        }),
        Arc::new(GetBalance {
            sdk: sdk.clone(),
            wallet: wallet.clone(),
        }),
        Arc::new(Transfer {
            sdk: sdk.clone(),
            wallet: wallet.clone(),
        }),
        Arc::new(Trade {
            sdk: sdk.clone(),
            wallet: wallet.clone(),
        }),
        Arc::new(Faucet {
            sdk: sdk.clone(),
            wallet: wallet.clone(),
        }),
        Arc::new(DeployMultiToken { sdk, wallet }),
    ]
}

struct GetWalletDetails {
    wallet: Arc<Wallet>,
}

#[async_trait]
impl Tool for GetWalletDetails {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "get_wallet_details".to_string(),
            description: "Get the agent wallet's address and network.".to_string(),
            parameters: json!({ "type": "object", "properties": {} }),
        }
    }

    async fn call(&self, _arguments: Value) -> Result<String, ToolError> {
        Ok(format!(
            "Wallet address: {} (network: {})",
            self.wallet.address, self.wallet.network_id
        ))
    }
}

struct GetBalance {
    sdk: Arc<dyn WalletSdk>,
    wallet: Arc<Wallet>,
}

#[async_trait]
impl Tool for GetBalance {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "get_balance".to_string(),
            description: "Get the wallet balance of a single asset, e.g. 'eth' or 'usdc'."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "asset": { "type": "string", "description": "Asset ticker or contract address" }
                },
                "required": ["asset"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let asset = required_str(&arguments, "asset")?;
        let amount = self.sdk.balance(&self.wallet, &asset).await?;
        Ok(format!("Balance of {}: {}", asset, amount))
    }
}

struct Transfer {
    sdk: Arc<dyn WalletSdk>,
    wallet: Arc<Wallet>,
}

#[async_trait]
impl Tool for Transfer {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "transfer".to_string(),
            description: "Transfer an amount of an asset to a destination address.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "number", "description": "Amount to transfer" },
                    "asset": { "type": "string", "description": "Asset ticker or contract address" },
                    "destination": { "type": "string", "description": "Destination address or ENS name" }
                },
                "required": ["amount", "asset", "destination"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let amount = required_amount(&arguments, "amount")?;
        let asset = required_str(&arguments, "asset")?;
        let destination = required_str(&arguments, "destination")?;

        let receipt = self
            .sdk
            .transfer(&self.wallet, amount, &asset, &destination)
            .await?;
        Ok(format!(
            "Transferred {} {} to {}. Transaction link: {}",
            amount, asset, destination, receipt.transaction_link
        ))
    }
}

struct Trade {
    sdk: Arc<dyn WalletSdk>,
    wallet: Arc<Wallet>,
}

#[async_trait]
impl Tool for Trade {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "trade".to_string(),
            description: "Trade an amount of one asset into another.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "amount": { "type": "number", "description": "Amount of from_asset to trade" },
                    "from_asset": { "type": "string", "description": "Asset to sell" },
                    "to_asset": { "type": "string", "description": "Asset to buy" }
                },
                "required": ["amount", "from_asset", "to_asset"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let amount = required_amount(&arguments, "amount")?;
        let from_asset = required_str(&arguments, "from_asset")?;
        let to_asset = required_str(&arguments, "to_asset")?;

        let receipt = self
            .sdk
            .trade(&self.wallet, amount, &from_asset, &to_asset)
            .await?;
        Ok(format!(
            "Traded {} {} for {}. Transaction link: {}",
            amount, from_asset, to_asset, receipt.transaction_link
        ))
    }
}

struct Faucet {
    sdk: Arc<dyn WalletSdk>,
    wallet: Arc<Wallet>,
}

#[async_trait]
impl Tool for Faucet {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "request_faucet_funds".to_string(),
            description: "Request testnet funds from the faucet. Only works on testnet networks."
                .to_string(),
            parameters: json!({ "type": "object", "properties": {} }),
        }
    }

    async fn call(&self, _arguments: Value) -> Result<String, ToolError> {
        let receipt = self.sdk.faucet(&self.wallet).await?;
        Ok(format!(
            "Faucet funds received. Transaction link: {}",
            receipt.transaction_link
        ))
    }
}

struct DeployMultiToken {
    sdk: Arc<dyn WalletSdk>,
    wallet: Arc<Wallet>,
}

#[async_trait]
impl Tool for DeployMultiToken {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "deploy_multi_token".to_string(),
            description: "This tool deploys a new multi-token contract with a specified base URI \
                          for token metadata. The base URI should be a template URL containing \
                          {id} which will be replaced with the token ID. For example: \
                          'https://example.com/metadata/{id}.json'"
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "base_uri": {
                        "type": "string",
                        "description": "The base URI template for token metadata. Must contain {id} placeholder."
                    }
                },
                "required": ["base_uri"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let base_uri = required_str(&arguments, "base_uri")?;
        if !base_uri.contains("{id}") {
            return Err(ToolError::InvalidInput(
                "base_uri must contain {id} placeholder".to_string(),
            ));
        }

        let deployment = self.sdk.deploy_multi_token(&self.wallet, &base_uri).await?;
        Ok(format!(
            "Successfully deployed multi-token contract at address: {}",
            deployment.contract_address
        ))
    }
}
