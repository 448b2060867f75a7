//! Wraps teloxide::Bot and implements the core [`Bot`] trait. Production
//! code sends through Telegram; tests substitute an in-memory recorder.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
};
use wbot_core::{Bot as CoreBot, Chat, MenuButton, Result, WalletBotError};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    fn parse_message_id(message_id: &str) -> Result<MessageId> {
        let id: i32 = message_id
            .parse()
            .map_err(|_| WalletBotError::Bot(format!("Invalid message_id: {}", message_id)))?;
        Ok(MessageId(id))
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_markdown(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_menu(&self, chat: &Chat, text: &str, rows: &[Vec<MenuButton>]) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(rows.iter().map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
                .collect::<Vec<_>>()
        }));
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(keyboard)
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_force_reply(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(ForceReply::new())
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat.id), Self::parse_message_id(message_id)?)
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn pin_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.bot
            .pin_chat_message(ChatId(chat.id), Self::parse_message_id(message_id)?)
            .await
            .map_err(|e| WalletBotError::Bot(e.to_string()))?;
        Ok(())
    }
}
