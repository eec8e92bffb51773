//! Plume CLI - terminal chat client for local language models.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;

mod commands;

/// Plume - chat with a local language model from the terminal
#[derive(Parser)]
#[command(name = "plume")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Model to use (default: PLUME_MODEL or llama3)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Send a single prompt and print the reply
    Ask {
        /// The prompt text
        prompt: String,
        /// Model to use (default: PLUME_MODEL or llama3)
        #[arg(short, long)]
        model: Option<String>,
        /// Print the reply without markdown styling
        #[arg(long)]
        raw: bool,
    },

    /// Run the HTTP relay in front of Ollama
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },

    /// Check that the tunnel (or local server) is reachable
    Probe,

    /// Show the resolved configuration
    Info,
}

fn main() -> miette::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    match cli.command {
        Commands::Chat { model } => runtime.block_on(commands::chat::run(model)),
        Commands::Ask { prompt, model, raw } => {
            runtime.block_on(commands::ask::run(&prompt, model, raw))
        }
        Commands::Serve { addr } => runtime.block_on(commands::serve::run(addr)),
        Commands::Probe => runtime.block_on(commands::probe::run()),
        Commands::Info => commands::info::run(),
    }
}
