//! ReAct loop: send the conversation to the model, run any tool calls it
//! requests, feed the results back, repeat until it answers in plain text.

use std::sync::Mutex;

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use tracing::{info, warn};

use crate::llm::LlmClient;
use crate::tools::Toolkit;

/// Cap on tool rounds per turn; stops a model that keeps calling tools
/// without ever producing an answer.
const MAX_TOOL_ROUNDS: usize = 8;

/// One streamed step of a turn: the model spoke, or a tool returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    Agent(String),
    Tool(String),
}

/// Agent with buffered conversation history. One runner is one conversation.
pub struct AgentRunner {
    llm: LlmClient,
    toolkit: Toolkit,
    system_prompt: String,
    history: Mutex<Vec<ChatCompletionRequestMessage>>,
}

impl AgentRunner {
    pub fn new(llm: LlmClient, toolkit: Toolkit, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            toolkit,
            system_prompt: system_prompt.into(),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Runs one user turn, emitting an [`AgentEvent`] per model reply and
    /// per tool result.
    pub async fn run_turn(
        &self,
        input: &str,
        mut on_event: impl FnMut(AgentEvent),
    ) -> Result<()> {
        {
            let mut history = self.history.lock().unwrap();
            history.push(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(input)
                    .build()?
                    .into(),
            );
        }

        let specs = self.toolkit.specs();

        for round in 0..MAX_TOOL_ROUNDS {
            let messages = self.messages_with_system()?;
            let reply = self.llm.chat(messages, &specs).await?;

            if let Some(content) = reply.content.as_deref().filter(|c| !c.trim().is_empty()) {
                on_event(AgentEvent::Agent(content.to_string()));
            }

            let tool_calls = reply.tool_calls.clone().unwrap_or_default();

            {
                let mut assistant = ChatCompletionRequestAssistantMessageArgs::default();
                if let Some(content) = reply.content.clone() {
                    assistant.content(content);
                }
                if !tool_calls.is_empty() {
                    assistant.tool_calls(tool_calls.clone());
                }
                self.history.lock().unwrap().push(assistant.build()?.into());
            }

            if tool_calls.is_empty() {
                return Ok(());
            }

            info!(round, calls = tool_calls.len(), "Running tool calls");
            for call in tool_calls {
                let arguments: serde_json::Value =
                    serde_json::from_str(&call.function.arguments)
                        .unwrap_or(serde_json::json!({}));

                let output = match self.toolkit.call(&call.function.name, arguments).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(tool = %call.function.name, error = %e, "Tool call failed");
                        format!("Error: {}", e)
                    }
                };
                on_event(AgentEvent::Tool(output.clone()));

                self.history.lock().unwrap().push(
                    ChatCompletionRequestToolMessageArgs::default()
                        .content(output)
                        .tool_call_id(call.id.clone())
                        .build()?
                        .into(),
                );
            }
        }

        warn!("Turn ended after hitting the tool-round cap");
        Ok(())
    }

    fn messages_with_system(&self) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()?
                .into()];
        messages.extend(self.history.lock().unwrap().iter().cloned());
        Ok(messages)
    }
}

/// Default operator briefing for the onchain agent.
pub fn default_system_prompt(network_id: &str) -> String {
    format!(
        "You are a helpful agent that can interact onchain using your wallet tools. You are \
         empowered to interact onchain using your tools. If you ever need funds, you can request \
         them from the faucet if you are on network ID `base-sepolia` (current network: `{}`). \
         If not, you can provide your wallet details and request funds from the user. If someone \
         asks you to do something you can't do with your currently available tools, you must say \
         so. Be concise and helpful with your responses. Refrain from restating your tools' \
         descriptions unless it is explicitly requested.",
        network_id
    )
}
