mod calc;
mod cmd;
mod data;
mod ui;

use anyhow::{anyhow, Context};
use chrono::{Datelike, Local, NaiveDate};
use clap::{ArgAction, Parser, Subcommand};
use data::AppSettings;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daylist", about = "per-day task checklist with a yearly calendar")]
struct Cli {
    /// Directory containing config.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Open the day view on this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = calc::parse_date_key)]
    date: Option<NaiveDate>,

    /// Write logs to this file (overrides log_file in config.yaml)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml into the config directory
    Init {
        /// Overwrite an existing config.yaml
        #[arg(long)]
        force: bool,
    },
    /// Print a Monday-first calendar of a whole year
    Calendar {
        /// Year to print (default: the current year)
        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match cli.command {
        // init must work even when the existing file is broken
        Some(Commands::Init { .. }) => AppSettings::default(),
        _ => AppSettings::load_from(&cli.config_dir)?,
    };
    if let Some(path) = &cli.log_file {
        settings.log_file = Some(path.clone());
    }

    let interactive = cli.command.is_none();
    init_tracing(
        log_level(cli.verbose, &settings.log_level),
        settings.log_file.as_deref(),
        !interactive,
    )?;

    match cli.command {
        None => cmd::root::run(settings, cli.date),
        Some(Commands::Init { force }) => cmd::init::run(&cli.config_dir, force),
        Some(Commands::Calendar { year }) => {
            cmd::calendar::run(year.unwrap_or_else(|| Local::now().year()))
        }
    }
}

/// `-v` flags override the configured level.
fn log_level(verbose: u8, configured: &str) -> &str {
    match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the tracing subscriber. The TUI owns the terminal, so it only
/// logs when a file is configured; subcommands log to stderr otherwise.
fn init_tracing(level: &str, log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    } else if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;
    }
    Ok(())
}
