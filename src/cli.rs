//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Homewatch - homework review status watcher
#[derive(Parser)]
#[command(
    name = "homewatch",
    about = "Polls the homework review API and notifies a Telegram chat on status changes",
    version,
    after_help = "Logs are written to: ~/.local/share/homewatch/logs/homewatch.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the poll loop (default when no subcommand is given)
    Run,

    /// Execute exactly one poll cycle and print the outcome
    Check,

    /// Show the watcher log
    Logs {
        /// Follow log output (like tail -f)
        #[arg(short, long)]
        follow: bool,

        /// Number of lines to show
        #[arg(short, long, default_value = "50")]
        lines: usize,
    },
}

/// Path of the append-only log file
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homewatch")
        .join("logs")
        .join("homewatch.log")
}
