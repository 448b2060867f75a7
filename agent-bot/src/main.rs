//! Binary for the onchain ReAct agent.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use agent_bot::{
    default_system_prompt, load_or_create, social_toolkit, wallet_toolkit, AgentConfig,
    AgentEvent, AgentRunner, LlmClient, Toolkit,
};
use anyhow::Result;
use clap::Parser;
use sdk_client::{HttpSocialApi, HttpWalletSdk};
use tracing::info;
use wbot_core::{init_tracing, SocialApi, WalletSdk};

mod cli;

use cli::{Cli, Commands};

const AUTONOMOUS_THOUGHT: &str = "Be creative and do something interesting on the blockchain. \
     Choose an action or set of actions and execute it that highlights your abilities.";

#[tokio::main]
async fn main() -> Result<()> {
    println!("Starting Agent...");
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AgentConfig::load()?;

    init_tracing(&config.log_file)?;

    // Ctrl+C exits unconditionally from either mode.
    tokio::spawn(async {
        let _ = tokio::signal::ctrl_c().await;
        println!("Goodbye Agent!");
        std::process::exit(0);
    });

    let runner = initialize_agent(&config).await?;

    match cli.command {
        Some(Commands::Chat { message }) => run_chat_mode(&runner, message).await,
        Some(Commands::Auto { interval }) => run_autonomous_mode(&runner, interval).await,
        None => match choose_mode()? {
            Mode::Chat => run_chat_mode(&runner, None).await,
            Mode::Auto => run_autonomous_mode(&runner, 10).await,
        },
    }
}

/// Builds the SDK clients, loads or creates the file-persisted wallet, and
/// assembles the toolkit and runner.
async fn initialize_agent(config: &AgentConfig) -> Result<AgentRunner> {
    let sdk: Arc<dyn WalletSdk> = Arc::new(HttpWalletSdk::new(
        config.sdk_base_url.clone(),
        config.api_key_name.clone(),
        config.api_key_secret.clone(),
    ));

    let wallet = Arc::new(
        load_or_create(sdk.as_ref(), &config.network_id, &config.wallet_data_file).await?,
    );
    info!(address = %wallet.address, network_id = %wallet.network_id, "Agent wallet ready");

    let mut toolkit = Toolkit::new().extend(wallet_toolkit(sdk, wallet));
    if let Some(token) = &config.social_bearer_token {
        let api: Arc<dyn SocialApi> = Arc::new(HttpSocialApi::new(
            config.social_base_url.clone(),
            token.clone(),
        ));
        toolkit = toolkit.extend(social_toolkit(api));
    } else {
        info!("SOCIAL_BEARER_TOKEN not set, social toolkit disabled");
    }

    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.model.clone(),
    );
    Ok(AgentRunner::new(
        llm,
        toolkit,
        default_system_prompt(&config.network_id),
    ))
}

fn print_event(event: AgentEvent) {
    match event {
        AgentEvent::Agent(text) | AgentEvent::Tool(text) => println!("{}", text),
    }
    println!("-------------------");
}

async fn run_turn(runner: &AgentRunner, input: &str) {
    if let Err(e) = runner.run_turn(input, print_event).await {
        eprintln!("Error: {}", e);
    }
}

/// Interactive conversation loop.
async fn run_chat_mode(runner: &AgentRunner, first_message: Option<String>) -> Result<()> {
    println!("Starting chat mode... Type 'exit' to end.");

    if let Some(message) = first_message {
        println!("\nUser: {}", message);
        run_turn(runner, &message).await;
    }

    loop {
        print!("\nUser: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        run_turn(runner, line).await;
    }
    Ok(())
}

/// Self-directed loop: the same prompt on a fixed interval.
async fn run_autonomous_mode(runner: &AgentRunner, interval: u64) -> Result<()> {
    println!("Starting autonomous mode...");
    loop {
        run_turn(runner, AUTONOMOUS_THOUGHT).await;
        tokio::time::sleep(Duration::from_secs(interval)).await;
    }
}

enum Mode {
    Chat,
    Auto,
}

/// Asks which mode to run until the answer is valid.
fn choose_mode() -> Result<Mode> {
    loop {
        println!("\nAvailable modes:");
        println!("1. chat    - Interactive chat mode");
        println!("2. auto    - Autonomous action mode");
        print!("\nChoose a mode (enter number or name): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            anyhow::bail!("stdin closed before a mode was chosen");
        }
        match line.trim().to_lowercase().as_str() {
            "1" | "chat" => return Ok(Mode::Chat),
            "2" | "auto" => return Ok(Mode::Auto),
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
