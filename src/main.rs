mod calc;
mod cmd;
mod data;
mod ui;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use data::{DateRange, PickerSettings};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path; the terminal belongs to the picker, so nothing is logged unless asked.
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "rangepick", about = "pick a date range in the terminal")]
struct Cli {
    /// Path to the directory containing config.yaml (default: ./config)
    #[arg(long, global = true, default_value = "./config")]
    data_dir: PathBuf,

    /// Initial range start (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Initial range end (YYYY-MM-DD); requires --from
    #[arg(long, global = true, value_parser = parse_date)]
    to: Option<NaiveDate>,

    /// Print the range as JSON instead of a label
    #[arg(long, global = true)]
    json: bool,

    /// Tag shown in the trigger's title
    #[arg(long)]
    class_name: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL, value_parser = parse_log_level)]
    log_level: Level,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml into the data directory
    Init {
        /// Overwrite an existing config.yaml
        #[arg(long)]
        force: bool,
    },
    /// Show the quick-select presets as computed for today
    Presets,
    /// Print the trigger label for --from/--to
    Label,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, &cli.log_file)?;

    let range = initial_range(cli.from, cli.to)?;

    match cli.command {
        Some(Commands::Init { force }) => cmd::init::run(&cli.data_dir, force),
        command => {
            let settings = PickerSettings::load_from(&cli.data_dir)?;
            match command {
                Some(Commands::Presets) => cmd::presets::run(Local::now().date_naive(), &settings),
                Some(Commands::Label) => cmd::label::run(range, &settings, cli.json),
                _ => cmd::root::run(settings, range, cli.class_name, cli.json),
            }
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", s, e))
}

/// Builds the starting range from the CLI flags. An end without a start is rejected.
fn initial_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> anyhow::Result<Option<DateRange>> {
    match (from, to) {
        (Some(from), to) => Ok(Some(DateRange::new(from, to))),
        (None, Some(_)) => bail!("--to requires --from"),
        (None, None) => Ok(None),
    }
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse::<Level>()
        .map_err(|_| format!("unknown log level '{}' (trace, debug, info, warn, error)", s))
}

/// Routes `tracing` output to `log_file`. The picker owns the terminal, so a
/// log that cannot be opened is reported as an error rather than sent to stderr.
fn init_logging(level: Level, log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install log subscriber")
}
