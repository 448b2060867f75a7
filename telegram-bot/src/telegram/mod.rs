//! Telegram transport: teloxide adapters and the update dispatcher.

pub mod adapters;
pub mod bot_adapter;
pub mod runner;

pub use adapters::{CallbackQueryWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_dispatcher;
