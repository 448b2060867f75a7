//! Thin async-openai wrapper: one chat-completion call with tool specs
//! attached.

use std::sync::Arc;

use anyhow::Result;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionResponseMessage, ChatCompletionTool,
    ChatCompletionToolArgs, CreateChatCompletionRequestArgs, FunctionObjectArgs,
};
use async_openai::Client;

use crate::tools::ToolSpec;

#[derive(Clone)]
pub struct LlmClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base_url) = base_url {
            config = config.with_api_base(base_url);
        }
        Self {
            client: Arc::new(Client::with_config(config)),
            model,
        }
    }

    /// One completion round. The returned message carries either content,
    /// tool calls, or both.
    pub async fn chat(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        tools: &[ToolSpec],
    ) -> Result<ChatCompletionResponseMessage> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);
        if !tools.is_empty() {
            args.tools(to_openai_tools(tools)?);
        }
        let request = args.build()?;

        let response = self.client.chat().create(request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No response from model"))?;
        Ok(choice.message)
    }
}

fn to_openai_tools(specs: &[ToolSpec]) -> Result<Vec<ChatCompletionTool>> {
    specs
        .iter()
        .map(|spec| {
            let function = FunctionObjectArgs::default()
                .name(&spec.name)
                .description(&spec.description)
                .parameters(spec.parameters.clone())
                .build()?;
            Ok(ChatCompletionToolArgs::default().function(function).build()?)
        })
        .collect()
}
