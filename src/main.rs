//! swenv - Swift toolchain developer environments on Windows
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use swenv::cli::{Cli, Commands};
use swenv::config::ConfigManager;
use swenv::error::SwenvResult;
use swenv::ui::UiContext;
use tracing::debug;
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

async fn run() -> SwenvResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("swenv=warn"),
        1 => EnvFilter::new("swenv=info"),
        _ => EnvFilter::new("swenv=debug"),
    };

    // stdout carries the session script
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    debug!("Using config {}", config_manager.path().display());

    let config = config_manager.load().await?;
    let ctx = UiContext::detect().with_quiet(cli.quiet);

    match cli.command {
        Commands::Config(args) => {
            swenv::cli::commands::config(args, &config_manager, &config, &ctx).await
        }
        command => swenv::cli::commands::environment(command, cli.shell, &config, &ctx).await,
    }
}
