//! Bot config: Telegram token, platform API credentials, encryption key,
//! database and logging. Loaded from env, fail-fast on required values.

use std::env;

use anyhow::{bail, Context, Result};

/// Everything the bot binary needs from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// SDK_API_KEY_NAME
    pub api_key_name: String,
    /// SDK_API_KEY_PRIVATE_KEY, with literal `\n` sequences unescaped.
    pub api_key_secret: String,
    /// ENCRYPTION_KEY, hex-encoded 256-bit key for the credential store.
    pub encryption_key: String,
    /// SDK_BASE_URL
    pub sdk_base_url: String,
    /// NETWORK_ID for wallet creation.
    pub network_id: String,
    /// DATABASE_URL (SQLite file path for the credential store).
    pub database_url: String,
    /// Log file path.
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_BOT_TOKEN
    /// if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN not set")?,
        };
        let api_key_name = env::var("SDK_API_KEY_NAME").context("SDK_API_KEY_NAME not set")?;
        // Private keys pasted into env files carry escaped newlines.
        let api_key_secret = env::var("SDK_API_KEY_PRIVATE_KEY")
            .context("SDK_API_KEY_PRIVATE_KEY not set")?
            .replace("\\n", "\n");
        let encryption_key = env::var("ENCRYPTION_KEY").context("ENCRYPTION_KEY not set")?;

        let sdk_base_url = env::var("SDK_BASE_URL")
            .unwrap_or_else(|_| "https://api.cdp.coinbase.com/platform".to_string());
        let network_id = env::var("NETWORK_ID").unwrap_or_else(|_| "base-mainnet".to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "credentials.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/wallet-bot.log".to_string());

        Ok(Self {
            bot_token,
            api_key_name,
            api_key_secret,
            encryption_key,
            sdk_base_url,
            network_id,
            database_url,
            log_file,
        })
    }

    /// Validate config values that would otherwise fail deep inside a
    /// handler (the encryption key must decode to 32 bytes).
    pub fn validate(&self) -> Result<()> {
        let key = self.encryption_key.trim();
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("ENCRYPTION_KEY must be 64 hex characters (a 256-bit key)");
        }
        if self.bot_token.trim().is_empty() {
            bail!("TELEGRAM_BOT_TOKEN must not be empty");
        }
        Ok(())
    }
}
