use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use agent_bot::{load_or_create, social_toolkit, wallet_toolkit, ToolError, Toolkit};
use async_trait::async_trait;
use serde_json::json;
use wbot_core::{
    AssetBalance, Deployment, Result, SocialApi, TxReceipt, Wallet, WalletData, WalletSdk,
};

#[derive(Default)]
struct StubSdk {
    creates: AtomicUsize,
    imports: AtomicUsize,
    deploys: AtomicUsize,
}

impl StubSdk {
    fn wallet_from(data: WalletData) -> Wallet {
        Wallet {
            id: data.wallet_id.clone(),
            address: "0xagent".to_string(),
            network_id: data.network_id.clone(),
            data,
        }
    }
}

#[async_trait]
impl WalletSdk for StubSdk {
    async fn create_wallet(&self, network_id: &str) -> Result<Wallet> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(Self::wallet_from(WalletData {
            wallet_id: "agent-wallet".to_string(),
            seed: "seed".to_string(),
            network_id: network_id.to_string(),
        }))
    }

    async fn import_wallet(&self, data: &WalletData) -> Result<Wallet> {
        self.imports.fetch_add(1, Ordering::SeqCst);
        Ok(Self::wallet_from(data.clone()))
    }

    async fn balances(&self, _wallet: &Wallet) -> Result<Vec<AssetBalance>> {
        Ok(vec![])
    }

    async fn balance(&self, _wallet: &Wallet, asset: &str) -> Result<f64> {
        Ok(if asset == "eth" { 0.75 } else { 0.0 })
    }

    async fn transfer(
        &self,
        _wallet: &Wallet,
        _amount: f64,
        _asset: &str,
        _to: &str,
    ) -> Result<TxReceipt> {
        Ok(TxReceipt {
            transaction_hash: "0xhash".to_string(),
            transaction_link: "https://sepolia.basescan.org/tx/0xhash".to_string(),
        })
    }

    async fn trade(
        &self,
        _wallet: &Wallet,
        _amount: f64,
        _from_asset: &str,
        _to_asset: &str,
    ) -> Result<TxReceipt> {
        Ok(TxReceipt {
            transaction_hash: "0xhash".to_string(),
            transaction_link: "https://sepolia.basescan.org/tx/0xhash".to_string(),
        })
    }

    async fn deploy_multi_token(&self, _wallet: &Wallet, _base_uri: &str) -> Result<Deployment> {
        self.deploys.fetch_add(1, Ordering::SeqCst);
        Ok(Deployment {
            contract_address: "0xcontract".to_string(),
        })
    }

    async fn faucet(&self, _wallet: &Wallet) -> Result<TxReceipt> {
        Ok(TxReceipt {
            transaction_hash: "0xhash".to_string(),
            transaction_link: "https://sepolia.basescan.org/tx/0xhash".to_string(),
        })
    }

    async fn export_private_key(&self, _wallet: &Wallet) -> Result<String> {
        Ok("0xkey".to_string())
    }
}

struct StubSocial;

#[async_trait]
impl SocialApi for StubSocial {
    async fn post_update(&self, _text: &str) -> Result<String> {
        Ok("1234567890".to_string())
    }

    async fn account_details(&self) -> Result<String> {
        Ok("@agent_account".to_string())
    }
}

async fn toolkit() -> (Toolkit, Arc<StubSdk>) {
    let sdk = Arc::new(StubSdk::default());
    let wallet = Arc::new(sdk.create_wallet("base-sepolia").await.unwrap());
    let toolkit = Toolkit::new()
        .extend(wallet_toolkit(sdk.clone(), wallet))
        .extend(social_toolkit(Arc::new(StubSocial)));
    (toolkit, sdk)
}

#[tokio::test]
async fn toolkit_advertises_all_tools() {
    let (toolkit, _) = toolkit().await;
    let names: Vec<String> = toolkit.specs().into_iter().map(|s| s.name).collect();
    for expected in [
        "get_wallet_details",
        "get_balance",
        "transfer",
        "trade",
        "request_faucet_funds",
        "deploy_multi_token",
        "post_update",
        "account_details",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {}", expected);
    }
}

#[tokio::test]
async fn get_balance_formats_amount() {
    let (toolkit, _) = toolkit().await;
    let out = toolkit
        .call("get_balance", json!({"asset": "eth"}))
        .await
        .unwrap();
    assert_eq!(out, "Balance of eth: 0.75");
}

#[tokio::test]
async fn deploy_requires_id_placeholder() {
    let (toolkit, sdk) = toolkit().await;

    let err = toolkit
        .call(
            "deploy_multi_token",
            json!({"base_uri": "https://example.com/metadata/token.json"}),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));
    assert_eq!(err.to_string(), "base_uri must contain {id} placeholder");
    assert_eq!(sdk.deploys.load(Ordering::SeqCst), 0);

    let out = toolkit
        .call(
            "deploy_multi_token",
            json!({"base_uri": "https://example.com/metadata/{id}.json"}),
        )
        .await
        .unwrap();
    assert_eq!(
        out,
        "Successfully deployed multi-token contract at address: 0xcontract"
    );
    assert_eq!(sdk.deploys.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transfer_validates_arguments() {
    let (toolkit, _) = toolkit().await;

    let err = toolkit
        .call("transfer", json!({"amount": -1, "asset": "eth", "destination": "0xdef"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));

    let err = toolkit
        .call("transfer", json!({"asset": "eth", "destination": "0xdef"}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "missing or invalid 'amount'");
}

#[tokio::test]
async fn unknown_tool_is_an_input_error() {
    let (toolkit, _) = toolkit().await;
    let err = toolkit.call("mint_moon", json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "unknown tool: mint_moon");
}

#[tokio::test]
async fn social_tools_pass_through() {
    let (toolkit, _) = toolkit().await;
    let out = toolkit
        .call("post_update", json!({"text": "gm"}))
        .await
        .unwrap();
    assert_eq!(out, "Posted successfully. Post id: 1234567890");

    let out = toolkit.call("account_details", json!({})).await.unwrap();
    assert_eq!(out, "@agent_account");
}

#[tokio::test]
async fn wallet_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet_data.txt");
    let sdk = StubSdk::default();

    let created = load_or_create(&sdk, "base-sepolia", &path).await.unwrap();
    assert!(path.exists());
    assert_eq!(sdk.creates.load(Ordering::SeqCst), 1);

    // Second start imports the persisted payload instead of creating.
    let imported = load_or_create(&sdk, "base-sepolia", &path).await.unwrap();
    assert_eq!(created.data, imported.data);
    assert_eq!(sdk.creates.load(Ordering::SeqCst), 1);
    assert_eq!(sdk.imports.load(Ordering::SeqCst), 1);

    // The file holds the export payload as plain JSON.
    let raw = std::fs::read_to_string(&path).unwrap();
    let data: WalletData = serde_json::from_str(&raw).unwrap();
    assert_eq!(data, created.data);
}

#[tokio::test]
async fn corrupt_wallet_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet_data.txt");
    std::fs::write(&path, "not json").unwrap();

    let sdk = StubSdk::default();
    assert!(load_or_create(&sdk, "base-sepolia", &path).await.is_err());
    assert_eq!(sdk.creates.load(Ordering::SeqCst), 0);
}
