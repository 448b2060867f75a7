//! Bot handlers: /start menu, inline-button dispatch, and the pending-input
//! conversation flows.

pub mod button_handler;
pub mod flow_handler;
pub mod menu_handler;

pub use button_handler::ButtonHandler;
pub use flow_handler::FlowHandler;
pub use menu_handler::MenuHandler;

use wbot_core::WalletBotError;

/// User-facing rendering per error kind: platform messages pass through
/// verbatim (insufficient funds, invalid address and so on are already
/// user-addressed), internal kinds get a fixed phrase instead of leaking
/// details.
pub(crate) fn describe_error(err: &WalletBotError) -> String {
    match err {
        WalletBotError::Sdk(message) | WalletBotError::Social(message) => message.clone(),
        WalletBotError::Cipher(_) | WalletBotError::Store(_) => {
            "stored wallet data could not be read".to_string()
        }
        WalletBotError::Config(_) => "the bot is misconfigured".to_string(),
        other => other.to_string(),
    }
}
