//! Agent config loaded from env. OPENAI_API_KEY and the platform API
//! credentials are required; everything else has defaults.

use std::env;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// OPENAI_API_KEY
    pub openai_api_key: String,
    /// OPENAI_BASE_URL, for proxies and compatible endpoints.
    pub openai_base_url: Option<String>,
    /// AGENT_MODEL
    pub model: String,
    /// SDK_API_KEY_NAME
    pub api_key_name: String,
    /// SDK_API_KEY_PRIVATE_KEY, with literal `\n` sequences unescaped.
    pub api_key_secret: String,
    /// SDK_BASE_URL
    pub sdk_base_url: String,
    /// NETWORK_ID. The agent defaults to the testnet so the faucet tool works.
    pub network_id: String,
    /// WALLET_DATA_FILE; plaintext wallet export for this single-operator
    /// demo, unlike the Telegram bot's encrypted per-user store.
    pub wallet_data_file: String,
    /// SOCIAL_API_BASE_URL
    pub social_base_url: String,
    /// SOCIAL_BEARER_TOKEN; when unset the social toolkit is not registered.
    pub social_bearer_token: Option<String>,
    /// Log file path.
    pub log_file: String,
}

impl AgentConfig {
    pub fn load() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let api_key_name = env::var("SDK_API_KEY_NAME").context("SDK_API_KEY_NAME not set")?;
        let api_key_secret = env::var("SDK_API_KEY_PRIVATE_KEY")
            .context("SDK_API_KEY_PRIVATE_KEY not set")?
            .replace("\\n", "\n");

        Ok(Self {
            openai_api_key,
            openai_base_url: env::var("OPENAI_BASE_URL").ok().filter(|s| !s.is_empty()),
            model: env::var("AGENT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_key_name,
            api_key_secret,
            sdk_base_url: env::var("SDK_BASE_URL")
                .unwrap_or_else(|_| "https://api.cdp.coinbase.com/platform".to_string()),
            network_id: env::var("NETWORK_ID").unwrap_or_else(|_| "base-sepolia".to_string()),
            wallet_data_file: env::var("WALLET_DATA_FILE")
                .unwrap_or_else(|_| "wallet_data.txt".to_string()),
            social_base_url: env::var("SOCIAL_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.x.com".to_string()),
            social_bearer_token: env::var("SOCIAL_BEARER_TOKEN").ok().filter(|s| !s.is_empty()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/agent-bot.log".to_string()),
        })
    }
}
