//! # sdk-client
//!
//! HTTP adapters behind the [`wbot_core::WalletSdk`] and
//! [`wbot_core::SocialApi`] traits. Everything network-shaped lives here;
//! the bots only see the traits.

pub mod social;
pub mod wallet;

pub use social::HttpSocialApi;
pub use wallet::HttpWalletSdk;
