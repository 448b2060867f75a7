//! HTTP social-media API adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use wbot_core::{Result, SocialApi, WalletBotError};

#[derive(Debug, Deserialize)]
struct PostResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Social API client authenticated with a bearer token.
pub struct HttpSocialApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl HttpSocialApi {
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(WalletBotError::Social(message))
    }
}

#[async_trait]
impl SocialApi for HttpSocialApi {
    async fn post_update(&self, text: &str) -> Result<String> {
        info!(len = text.len(), "Publishing post");
        let response = self
            .client
            .post(format!("{}/v2/posts", self.base_url))
            .bearer_auth(&self.bearer_token)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| WalletBotError::Social(format!("request failed: {}", e)))?;

        let post: PostResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| WalletBotError::Social(format!("malformed response: {}", e)))?;
        Ok(post.id)
    }

    async fn account_details(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/v2/account", self.base_url))
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| WalletBotError::Social(format!("request failed: {}", e)))?;

        Self::check(response)
            .await?
            .text()
            .await
            .map_err(|e| WalletBotError::Social(format!("malformed response: {}", e)))
    }
}
