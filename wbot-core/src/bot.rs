//! Bot abstraction for sending messages and menus.
//!
//! [`Bot`] is transport-agnostic; the teloxide adapter lives in the
//! telegram-bot crate so tests can substitute an in-memory implementation.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;

/// One inline keyboard button: a visible label and the callback data sent
/// back when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub data: String,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Abstraction for the chat transport. Implementations map to Telegram;
/// tests use an in-memory recorder.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a MarkdownV2-formatted message (used to render the exported
    /// key in backticks).
    async fn send_markdown(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a message with an inline keyboard; `rows` is the button grid.
    async fn send_menu(&self, chat: &Chat, text: &str, rows: &[Vec<MenuButton>]) -> Result<()>;

    /// Sends a prompt that forces a reply from the client (pending-input
    /// flows: amount, asset, address).
    async fn send_force_reply(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a message and returns its id so it can be deleted later
    /// (e.g. "Waiting for withdrawal to complete..." placeholders).
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;

    /// Deletes a previously sent message. `message_id` is transport-specific.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;

    /// Pins a message in the chat.
    async fn pin_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
}
