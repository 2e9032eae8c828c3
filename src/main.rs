use anyhow::anyhow;
use clap::{Parser, Subcommand};
use monthcal::cmd::{self, print::Format};
use monthcal::data::{self, CalendarSettings};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "monthcal", about = "month calendar with previous/next navigation")]
struct Cli {
    /// Path to the data directory containing calendar.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// First month to show: YYYY-MM-DD or "today" (overrides calendar.yaml)
    #[arg(long, global = true)]
    start_date: Option<String>,

    /// Number of months shown side by side (overrides calendar.yaml)
    #[arg(long, global = true)]
    calendars: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default calendar.yaml into the data directory
    Init,
    /// Render the calendar once and write it to stdout
    Print {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

impl Cli {
    fn overrides(&self) -> CalendarSettings {
        CalendarSettings {
            start_date: self.start_date.clone(),
            calendars: self.calendars,
            ..Default::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    let load_settings = || -> anyhow::Result<CalendarSettings> {
        let settings = CalendarSettings::load()?.merge(cli.overrides());
        debug!(?settings, "resolved calendar settings");
        Ok(settings)
    };

    match &cli.command {
        None => cmd::root::run(load_settings()?),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Print { format }) => cmd::print::run(load_settings()?, *format),
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
