//! askmongo CLI — the main entry point.
//!
//! Commands:
//! - `query`  — Ask a one-shot natural-language question
//! - `shell`  — Interactive query shell
//! - `init`   — Create the default config file
//! - `doctor` — Diagnose setup problems

use clap::{Parser, Subcommand};

mod commands;
mod reporter;

#[derive(Parser)]
#[command(
    name = "askmongo",
    about = "Natural-language MongoDB queries, powered by Claude and MCP",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a one-shot question about your data
    Query {
        /// The natural-language question
        prompt: String,

        /// Print only the final answer
        #[arg(short, long)]
        quiet: bool,
    },

    /// Interactive query shell
    Shell,

    /// Create the default config file
    Init,

    /// Diagnose setup problems
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; --quiet keeps the answer as the only stdout line
    let quiet = matches!(&cli.command, Commands::Query { quiet: true, .. });
    let filter = if cli.verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Query { prompt, quiet } => commands::query::run(prompt, quiet).await?,
        Commands::Shell => commands::shell::run().await?,
        Commands::Init => commands::init::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
