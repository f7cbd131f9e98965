//! Command-line argument surface, mirroring the teacher's derive-based
//! `Cli` struct.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "aicof", about = "Autonomous coding-agent orchestrator")]
pub struct Cli {
    /// Increase log verbosity: -v info, -vv debug, -vvv trace.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scaffold a project: writes aicof.yaml, prd.json, and the prompt
    /// files.
    Init {
        /// Directory to initialize. Defaults to the current directory.
        #[arg(long)]
        project_dir: Option<PathBuf>,
        /// Project name recorded in prd.json. Defaults to the directory
        /// name.
        #[arg(long)]
        name: Option<String>,
        /// Agent tool to configure: claude, amp, cursor, or codex.
        #[arg(long, default_value = "claude")]
        ai_tool: String,
        /// Run discovery iterations when no pending task is ready.
        #[arg(long)]
        pilot_mode: bool,
    },
    /// Runs the iteration driver to completion or failure.
    Run {
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
    /// Prints the plan's current progress summary.
    Status {
        #[arg(long)]
        project_dir: Option<PathBuf>,
    },
}
