//! Marvin - guided strategy coach
//!
//! CLI entry point for the interactive coaching session.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use strategycoach::cli::{Cli, Command};
use strategycoach::config::Config;
use strategycoach::repl;
use strategycoach::session::SessionMode;

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("strategycoach")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout/stderr - the terminal belongs to the
    // conversation
    let level = level.unwrap_or("info");
    let directive = level
        .parse()
        .map_err(|_| eyre::eyre!("Invalid log level: {}", level))?;
    let log_file = fs::File::create(log_dir.join("strategycoach.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Chat { mode }) => {
            let mode_override = parse_mode(mode.as_deref())?;
            repl::run_interactive(config, mode_override).await
        }
        Some(Command::Config) => cmd_config(&config),
        None => repl::run_interactive(config, None).await,
    }
}

fn parse_mode(arg: Option<&str>) -> Result<Option<SessionMode>> {
    match arg {
        None => Ok(None),
        Some(s) => SessionMode::parse(s)
            .map(Some)
            .ok_or_else(|| eyre::eyre!("Unknown mode: {} (use workshop or board)", s)),
    }
}

/// Print the effective configuration
fn cmd_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{}", yaml);
    Ok(())
}
