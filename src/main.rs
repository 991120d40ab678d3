//! Homewatch - homework review status watcher
//!
//! CLI entry point: startup validation, wiring, and the poll loop.

use std::fs;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{error, info, warn};

use homewatch::api::PracticumClient;
use homewatch::cli::{Cli, Command, get_log_path};
use homewatch::config::{Config, Credentials};
use homewatch::notify::TelegramNotifier;
use homewatch::watcher::{HomeworkWatcher, WatcherConfig};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Append-only: restarts keep the history
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    let level = if verbose { tracing::Level::TRACE } else { tracing::Level::DEBUG };

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Some(Command::Check) => cmd_check(&config).await,
        Some(Command::Logs { follow, lines }) => cmd_logs(follow, lines).await,
        Some(Command::Run) | None => cmd_run(&config).await,
    }
}

/// Validate credentials and assemble the watcher
fn build_watcher(config: &Config) -> Result<HomeworkWatcher> {
    // Startup-fatal: no notification is attempted without validated
    // credentials, so the failure is log-and-abort only.
    let credentials = match Credentials::from_env(config) {
        Ok(creds) => creds,
        Err(e) => {
            error!(error = %e, "Startup credential check failed");
            return Err(e);
        }
    };

    let api = Arc::new(PracticumClient::from_config(&config.api, &credentials).context("Failed to create API client")?);
    let notifier =
        Arc::new(TelegramNotifier::from_config(&config.telegram, &credentials).context("Failed to create notifier")?);

    Ok(HomeworkWatcher::new(WatcherConfig::from(&config.watcher), api, notifier))
}

/// Run the poll loop until the process is terminated
async fn cmd_run(config: &Config) -> Result<()> {
    let mut watcher = build_watcher(config)?;

    info!(
        endpoint = %config.api.base_url,
        interval_secs = config.watcher.retry_interval_secs,
        "Homewatch starting"
    );

    tokio::select! {
        _ = watcher.run() => unreachable!("watcher loop does not return"),
        _ = shutdown_signal() => {
            warn!("Shutdown signal received");
        }
    }

    info!("Homewatch stopped");
    Ok(())
}

/// Execute a single poll cycle and print the outcome
async fn cmd_check(config: &Config) -> Result<()> {
    let mut watcher = build_watcher(config)?;

    match watcher.check_once().await {
        Ok(Some(message)) => {
            println!("Status change detected:");
            println!("  {}", message);
        }
        Ok(None) => {
            println!("No status change.");
        }
        Err(e) => {
            println!("Poll cycle failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Show the log file
async fn cmd_logs(follow: bool, lines: usize) -> Result<()> {
    let log_path = get_log_path();

    if !log_path.exists() {
        println!("No log file found at: {}", log_path.display());
        println!("The watcher may not have been started yet.");
        return Ok(());
    }

    if follow {
        println!("Following log file: {} (Ctrl+C to stop)", log_path.display());
        println!();

        let mut child = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&log_path)
            .spawn()
            .context("Failed to run tail -f")?;

        child.wait()?;
    } else {
        let file = fs::File::open(&log_path).context("Failed to open log file")?;
        let reader = BufReader::new(file);
        let all_lines: Vec<String> = reader.lines().map_while(Result::ok).collect();

        let start = if all_lines.len() > lines { all_lines.len() - lines } else { 0 };

        for line in &all_lines[start..] {
            println!("{}", line);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
