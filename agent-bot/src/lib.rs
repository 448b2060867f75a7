//! # agent-bot
//!
//! CLI ReAct agent: an LLM drives wallet-platform and social-media tools
//! over a buffered conversation. Runs interactively (chat mode) or on a
//! timer with a self-directed prompt (autonomous mode).

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;
pub mod wallet_file;

pub use agent::{default_system_prompt, AgentEvent, AgentRunner};
pub use config::AgentConfig;
pub use llm::LlmClient;
pub use tools::{social_toolkit, wallet_toolkit, Tool, ToolError, ToolSpec, Toolkit};
pub use wallet_file::load_or_create;
