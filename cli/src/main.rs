//! CLI entrypoint for aicof.
//!
//! This is the thin binary that wires the layers together; all
//! business logic lives in `aicof-domain` and `aicof-application`.

mod args;
mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};

fn init_tracing(verbosity: u8, project_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let log_dir = project_dir.join(".claude").join("auto").join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(log_dir, "aicof.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .init();

    guard
}

fn resolve_project_dir(project_dir: Option<PathBuf>) -> Result<PathBuf> {
    match project_dir {
        Some(p) => Ok(p),
        None => Ok(std::env::current_dir()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_dir_hint = match &cli.command {
        Command::Init { project_dir, .. } => project_dir.clone(),
        Command::Run { project_dir } => project_dir.clone(),
        Command::Status { project_dir } => project_dir.clone(),
    };
    let project_dir = resolve_project_dir(project_dir_hint)?;
    let _guard = init_tracing(cli.verbose, &project_dir);

    info!("aicof starting");

    match cli.command {
        Command::Init { name, ai_tool, pilot_mode, .. } => {
            commands::init(project_dir, name, ai_tool, pilot_mode)
        }
        Command::Run { .. } => commands::run(project_dir),
        Command::Status { .. } => commands::status(project_dir),
    }
}
