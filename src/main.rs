//! Larder - local resolver state
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use larder::cli::{Cli, Commands};
use larder::config::ConfigManager;
use larder::error::LarderResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> LarderResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("larder=warn"),
        1 => EnvFilter::new("larder=info"),
        _ => EnvFilter::new("larder=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Feeds(args) => larder::cli::commands::feeds(args.json, &config).await,
        Commands::Stale(args) => larder::cli::commands::stale(&args.uri, &config).await,
        Commands::Installed(args) => larder::cli::commands::installed(args, &config).await,
        Commands::Config(args) => larder::cli::commands::config(args, &config).await,
    }
}
