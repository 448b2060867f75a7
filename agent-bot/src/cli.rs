//! CLI for the agent binary.

use clap::{Parser, Subcommand};

/// Root CLI. Without a subcommand the mode is chosen interactively.
#[derive(Parser)]
#[command(name = "agent-bot")]
#[command(about = "Onchain ReAct agent: chat with it or let it act autonomously", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat mode. Optional first message; then stdin line by
    /// line. Type 'exit' or Ctrl+C to quit.
    Chat {
        #[arg(value_name = "MESSAGE")]
        message: Option<String>,
    },

    /// Autonomous mode: the agent acts on its own on a fixed interval.
    Auto {
        /// Seconds to wait between actions.
        #[arg(short, long, default_value = "10")]
        interval: u64,
    },
}
