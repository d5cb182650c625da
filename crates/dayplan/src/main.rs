//! CLI entry point for dayplan.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use config::AppConfig;

mod commands;
mod config;

/// Dated tasks with priorities and local reminders.
#[derive(Parser, Debug)]
#[command(
    name = "dayplan",
    version,
    about = "dayplan: a day-oriented task list stored as a JSON snapshot"
)]
struct Cli {
    /// Path to the tasks file (defaults to the configured data file).
    #[arg(long)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task due on a day at a time.
    Add {
        #[arg(long)]
        text: String,
        /// Due day as YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<String>,
        /// Due time as HH:MM (defaults to the current time).
        #[arg(long)]
        time: Option<String>,
        #[arg(long, default_value = "low")]
        priority: String,
    },

    /// List the agenda of a day.
    Ls {
        /// Day as YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<String>,
        /// all, active, completed, low, medium or high.
        #[arg(long, default_value = "all")]
        filter: String,
        #[arg(long, value_enum, default_value = "table")]
        format: LsFormat,
    },

    /// Flip a task between to-do and done.
    Toggle {
        #[arg(long)]
        task: String,
    },

    /// Remove a task and cancel its reminder.
    Rm {
        #[arg(long)]
        task: String,
    },

    /// Remove every done task of a day.
    ClearDone {
        /// Day as YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<String>,
    },

    /// List unfinished tasks across all days.
    Pending,

    /// Show completion statistics.
    Stats {
        /// Day as YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<String>,
    },

    /// List the days that have tasks.
    Days,

    /// Apply notification responses read from stdin.
    Listen,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
enum LsFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if should_install_tracing(&cli.cmd) {
        install_tracing();
    }

    let config = AppConfig::load()?;
    // The local offset cannot be read once worker threads exist, so
    // resolve the clock before starting the runtime.
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    tokio::runtime::Runtime::new()?.block_on(commands::execute(cli, config, now))
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Listen)
}

fn install_tracing() {
    // RUST_LOG overrides the default INFO level.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
