//! Nimbo — terminal coding agent.
//!
//! Usage:
//!   nimbo                         Start an interactive session
//!   nimbo --model gpt-4o          Override the configured model
//!   nimbo --config ./nimbo.toml   Use a specific config file

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use nimbo::agent::{system_prompt, AgentSession};
use nimbo::backend::OpenAiBackend;
use nimbo::config;
use nimbo::tools::ToolRegistry;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "nimbo")]
#[command(version)]
#[command(about = "Conversational coding agent with local filesystem tools")]
struct Cli {
    /// Path to the config file.
    #[arg(long)]
    config: Option<String>,

    /// Chat model to use (overrides config).
    #[arg(long)]
    model: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Maximum backend round-trips per turn (overrides config).
    #[arg(long)]
    max_iterations: Option<usize>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(config::expand_path)
        .unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(model) = cli.model {
        cfg.model = model;
    }
    if let Some(max_iterations) = cli.max_iterations {
        cfg.max_tool_iterations = max_iterations;
    }

    // Initialize logging (stderr, so the transcript on stdout stays clean)
    let log_level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if dotenvy::dotenv().is_ok() {
        debug!("Loaded .env from working directory");
    }

    let Some(api_key) = cfg.api_key() else {
        bail!(
            "Missing API key: set the {} environment variable",
            cfg.api_key_env
        );
    };

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let backend = OpenAiBackend::new(&cfg.api_base_url, &api_key, &cfg.model)
        .with_max_tokens(cfg.max_tokens)
        .with_temperature(cfg.temperature);
    let registry = ToolRegistry::with_defaults(&cwd);
    let prompt = system_prompt::resolve_system_prompt(&cfg.system_prompt);

    let mut session =
        AgentSession::new(backend, registry, prompt).with_max_iterations(cfg.max_tool_iterations);

    info!(
        "Session started (model: {}, cwd: {})",
        session.backend().model(),
        cwd.display()
    );

    run_repl(&mut session).await
}

// ---------------------------------------------------------------------------
// REPL
// ---------------------------------------------------------------------------

async fn run_repl(session: &mut AgentSession<OpenAiBackend>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}: ", "You".blue());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            println!();
            info!("End of input, exiting");
            return Ok(());
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = session.turn(input).await;
        println!("{}: {}", "Nimbo".green(), reply);
    }
}
