//! Conversation state machine for the multi-step flows.
//!
//! Each chat is in exactly one [`ConversationState`]. Button presses enter a
//! flow via [`begin`]; free text advances it via [`on_text`], a pure function
//! from (state, input) to a [`Transition`]. Balance lookups and SDK calls
//! are described by the transition and performed by the caller, so every
//! path through the flows is testable without a network.

use std::sync::OnceLock;

use regex::Regex;

/// Where a chat currently is in a flow. `Idle` means free text is ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationState {
    Idle,
    AwaitingWithdrawAmount,
    AwaitingWithdrawAddress { amount: f64 },
    AwaitingBuyAmount,
    AwaitingBuyAsset { amount: f64 },
    AwaitingSellAsset,
    AwaitingSellAmount { asset: String },
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Flow entry points, one per menu button that starts a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowCommand {
    Withdraw,
    Buy,
    Sell,
}

/// A fully-specified platform call produced at the end of a flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
    Withdraw { amount: f64, to: String },
    Buy { amount: f64, asset: String },
    Sell { amount: f64, asset: String },
}

/// What to do once the caller has confirmed the wallet balance covers
/// `amount` in a [`Transition::RequireBalance`].
#[derive(Debug, Clone, PartialEq)]
pub enum AfterBalance {
    /// Ask the next question and move to `next`.
    Prompt {
        reply: String,
        next: ConversationState,
    },
    /// Flow complete; run the call and reset to idle.
    Execute { call: SdkCall },
}

/// Result of feeding one text input into the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Input rejected; reply and stay in the current state so the user can
    /// try again.
    Reject { reply: String },
    /// Input accepted; ask the next question (force-reply) and move on.
    Prompt {
        reply: String,
        next: ConversationState,
    },
    /// Input accepted pending a balance check on `asset`. If the balance
    /// covers `amount`, proceed with `then`; otherwise reply with the
    /// insufficient-balance message (showing `display` and the balance) and
    /// stay put.
    RequireBalance {
        asset: String,
        display: String,
        amount: f64,
        then: AfterBalance,
    },
    /// Flow complete; run the call and reset to idle.
    Execute { call: SdkCall },
    /// Not in a flow; the input is not ours.
    None,
}

/// Enters a flow: returns the new state and the force-reply prompt to send.
pub fn begin(command: FlowCommand) -> (ConversationState, &'static str) {
    match command {
        FlowCommand::Withdraw => (
            ConversationState::AwaitingWithdrawAmount,
            "How much ETH would you like to withdraw?",
        ),
        FlowCommand::Buy => (
            ConversationState::AwaitingBuyAmount,
            "How much ETH would you like to spend on the buy?",
        ),
        FlowCommand::Sell => (
            ConversationState::AwaitingSellAsset,
            "Which asset would you like to sell? (ticker or contract address)",
        ),
    }
}

/// Advances the flow with one free-text input.
pub fn on_text(state: &ConversationState, text: &str) -> Transition {
    match state {
        ConversationState::Idle => Transition::None,

        ConversationState::AwaitingWithdrawAmount => match parse_amount(text) {
            Err(reject) => reject,
            Ok(amount) => Transition::RequireBalance {
                asset: "eth".to_string(),
                display: "ETH".to_string(),
                amount,
                then: AfterBalance::Prompt {
                    reply: "Please enter the Ethereum address to withdraw to:".to_string(),
                    next: ConversationState::AwaitingWithdrawAddress { amount },
                },
            },
        },

        ConversationState::AwaitingWithdrawAddress { amount } => {
            let address = text.trim();
            if is_valid_eth_address(address) {
                Transition::Execute {
                    call: SdkCall::Withdraw {
                        amount: *amount,
                        to: address.to_string(),
                    },
                }
            } else {
                Transition::Reject {
                    reply: "Invalid Ethereum address. Please enter a valid address.".to_string(),
                }
            }
        }

        ConversationState::AwaitingBuyAmount => match parse_amount(text) {
            Err(reject) => reject,
            Ok(amount) => Transition::RequireBalance {
                asset: "eth".to_string(),
                display: "ETH".to_string(),
                amount,
                then: AfterBalance::Prompt {
                    reply: "Please enter the asset you'd like to buy (ticker or contract address):"
                        .to_string(),
                    next: ConversationState::AwaitingBuyAsset { amount },
                },
            },
        },

        ConversationState::AwaitingBuyAsset { amount } => Transition::Execute {
            call: SdkCall::Buy {
                amount: *amount,
                asset: text.trim().to_string(),
            },
        },

        ConversationState::AwaitingSellAsset => {
            let asset = text.trim().to_string();
            Transition::Prompt {
                reply: format!("How much {} would you like to sell?", asset),
                next: ConversationState::AwaitingSellAmount { asset },
            }
        }

        ConversationState::AwaitingSellAmount { asset } => match parse_amount(text) {
            Err(reject) => reject,
            Ok(amount) => Transition::RequireBalance {
                asset: asset.clone(),
                display: asset.clone(),
                amount,
                then: AfterBalance::Execute {
                    call: SdkCall::Sell {
                        amount,
                        asset: asset.clone(),
                    },
                },
            },
        },
    }
}

/// The flow's execute/prompt messages around the SDK call.
impl SdkCall {
    /// Placeholder sent while the call is in flight, deleted afterwards.
    pub fn waiting_message(&self) -> &'static str {
        match self {
            SdkCall::Withdraw { .. } => "Waiting for withdrawal to complete...",
            SdkCall::Buy { .. } => "Executing buy...",
            SdkCall::Sell { .. } => "Executing sell...",
        }
    }

    pub fn success_message(&self, transaction_link: &str) -> String {
        match self {
            SdkCall::Withdraw { .. } => format!(
                "Withdrawal complete! Transaction link: {}",
                transaction_link
            ),
            SdkCall::Buy { .. } => format!(
                "Buy successfully completed! Transaction link: {}",
                transaction_link
            ),
            SdkCall::Sell { .. } => format!(
                "Sell successfully completed! Transaction link: {}",
                transaction_link
            ),
        }
    }

    pub fn failure_message(&self, error: &str) -> String {
        match self {
            SdkCall::Withdraw { .. } => format!("Withdrawal failed: {}", error),
            SdkCall::Buy { .. } => format!("Buy failed: {}", error),
            SdkCall::Sell { .. } => format!("Sell failed: {}", error),
        }
    }
}

/// Validates and parses a decimal amount; rejects non-numeric and
/// non-positive input with the exact user-facing messages.
fn parse_amount(text: &str) -> Result<f64, Transition> {
    static DECIMAL: OnceLock<Regex> = OnceLock::new();
    let decimal = DECIMAL.get_or_init(|| Regex::new(r"^\d*\.?\d+$").unwrap());

    let text = text.trim();
    if !decimal.is_match(text) {
        return Err(Transition::Reject {
            reply: "Invalid amount. Please enter a valid number.".to_string(),
        });
    }
    let amount: f64 = text.parse().map_err(|_| Transition::Reject {
        reply: "Invalid amount. Please enter a valid number.".to_string(),
    })?;
    if amount <= 0.0 {
        return Err(Transition::Reject {
            reply: "Please enter a positive amount.".to_string(),
        });
    }
    Ok(amount)
}

/// Accepts 0x-prefixed hex addresses and `.eth` / `.base.eth` names.
pub fn is_valid_eth_address(address: &str) -> bool {
    static HEX_ADDRESS: OnceLock<Regex> = OnceLock::new();
    static ENS_NAME: OnceLock<Regex> = OnceLock::new();

    let hex = HEX_ADDRESS.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap());
    let ens = ENS_NAME.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9-]+(\.base)?\.eth$").unwrap()
    });

    hex.is_match(address) || ens.is_match(address)
}
