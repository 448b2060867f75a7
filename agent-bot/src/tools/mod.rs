//! Tool surface for the ReAct agent: a [`Tool`] trait with a JSON-schema
//! spec per tool, and a [`Toolkit`] that dispatches calls by name.

pub mod social_tools;
pub mod wallet_tools;

pub use social_tools::social_toolkit;
pub use wallet_tools::wallet_toolkit;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use wbot_core::WalletBotError;

#[derive(Error, Debug)]
pub enum ToolError {
    /// Malformed or missing arguments from the model.
    #[error("{0}")]
    InvalidInput(String),
    /// The underlying platform call failed.
    #[error("{0}")]
    Call(#[from] WalletBotError),
}

/// Name, description, and JSON-schema parameters advertised to the model.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// One callable the agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    async fn call(&self, arguments: Value) -> Result<String, ToolError>;
}

/// All tools available to the agent, dispatchable by name.
#[derive(Clone, Default)]
pub struct Toolkit {
    tools: Vec<Arc<dyn Tool>>,
}

impl Toolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Runs the named tool. An unknown name is an input error (the model
    /// hallucinated a tool).
    pub async fn call(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.spec().name == name)
            .ok_or_else(|| ToolError::InvalidInput(format!("unknown tool: {}", name)))?;
        tool.call(arguments).await
    }
}

/// Extracts a required string argument.
pub(crate) fn required_str(arguments: &Value, key: &str) -> Result<String, ToolError> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ToolError::InvalidInput(format!("missing or invalid '{}'", key)))
}

/// Extracts a required positive number argument.
pub(crate) fn required_amount(arguments: &Value, key: &str) -> Result<f64, ToolError> {
    let amount = arguments
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| ToolError::InvalidInput(format!("missing or invalid '{}'", key)))?;
    if amount <= 0.0 {
        return Err(ToolError::InvalidInput(format!(
            "'{}' must be positive",
            key
        )));
    }
    Ok(amount)
}
