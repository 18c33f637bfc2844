//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// StrategyCoach - guided strategy conversations in the terminal
#[derive(Parser)]
#[command(
    name = "coach",
    about = "Phase-driven strategy coaching conversation",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive coaching session (the default)
    Chat {
        /// Session mode: workshop (guided, plain) or board (terse, direct)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Print the effective configuration as YAML
    Config,
}
