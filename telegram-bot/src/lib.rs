//! # Telegram wallet bot
//!
//! Menu-driven onchain trading bot: every user gets a wallet persisted
//! through the encrypted credential store, the inline keyboard maps each
//! button to one platform call, and withdraw/buy/sell run as explicit
//! conversation state machines over force-reply prompts.

pub mod chain;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod state;
pub mod telegram;

pub use chain::HandlerChain;
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use handlers::{ButtonHandler, FlowHandler, MenuHandler};
pub use runner::{build_handler_chain, run_bot};
pub use state::{begin, is_valid_eth_address, on_text, ConversationState, FlowCommand, SdkCall, Transition};
pub use telegram::{run_dispatcher, TelegramBotAdapter};

// Core types used throughout the handler surface.
pub use wbot_core::{Bot, Chat, Handler, HandlerResponse, MenuButton, Message, MessageDirection, User};
