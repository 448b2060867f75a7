//! # wbot-core
//!
//! Core types and traits for the wallet bots: the closed error-kind enum,
//! message/chat/user types, the [`Handler`] chain contract, the [`Bot`]
//! transport seam, the [`WalletSdk`] and [`SocialApi`] black-box boundaries,
//! and tracing initialization. Transport-agnostic; used by storage,
//! sdk-client, telegram-bot, and agent-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod sdk;
pub mod types;

pub use bot::{Bot, MenuButton};
pub use error::{CipherError, Result, WalletBotError};
pub use logger::init_tracing;
pub use sdk::{AssetBalance, Deployment, SocialApi, TxReceipt, Wallet, WalletData, WalletSdk};
pub use types::{Chat, Handler, HandlerResponse, Message, MessageDirection, User};
