//! Social-media tools: post an update, look up the authenticated account.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use wbot_core::SocialApi;

use super::{required_str, Tool, ToolError, ToolSpec};

pub fn social_toolkit(api: Arc<dyn SocialApi>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(PostUpdate { api: api.clone() }),
        Arc::new(AccountDetails { api }),
    ]
}

struct PostUpdate {
    api: Arc<dyn SocialApi>,
}

#[async_trait]
impl Tool for PostUpdate {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "post_update".to_string(),
            description: "Publish a post on the connected social-media account.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "description": "Text of the post" }
                },
                "required": ["text"]
            }),
        }
    }

    async fn call(&self, arguments: Value) -> Result<String, ToolError> {
        let text = required_str(&arguments, "text")?;
        let id = self.api.post_update(&text).await?;
        Ok(format!("Posted successfully. Post id: {}", id))
    }
}

struct AccountDetails {
    api: Arc<dyn SocialApi>,
}

#[async_trait]
impl Tool for AccountDetails {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "account_details".to_string(),
            description: "Get details of the authenticated social-media account.".to_string(),
            parameters: json!({ "type": "object", "properties": {} }),
        }
    }

    async fn call(&self, _arguments: Value) -> Result<String, ToolError> {
        Ok(self.api.account_details().await?)
    }
}
