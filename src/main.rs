//! CLI entry point for the bikeshare statistics explorer.
//!
//! Runs the interactive session by default; `summary` prints a single report
//! for a city and filter given on the command line.

use anyhow::Result;
use bikeshare_stats::{
    city::City,
    config::AppConfig,
    filter::{DayFilter, MonthFilter, TripFilter},
    session::{SummaryFormat, explore, summary},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively choose a city and filters, then browse the statistics
    Explore,
    /// Print the statistics for one city and filter without prompting
    Summary {
        /// chicago, "new york city" or washington
        #[arg(short, long)]
        city: City,

        /// all, or january through june
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// all, or monday through sunday
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        #[arg(short, long, value_enum, default_value_t = SummaryFormat::Text)]
        format: SummaryFormat,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_data_dir(cli.data_dir);

    // Logging setup: stderr (warnings by default, the console is the UI) + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("warn")));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    info!(data_dir = %config.data_dir.display(), "Starting");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            explore(&config.data_dir, stdin.lock(), std::io::stdout())?;
        }
        Commands::Summary {
            city,
            month,
            day,
            format,
        } => {
            let filter = TripFilter::new(month, day);
            summary(
                &config.data_dir,
                city,
                filter,
                format,
                &mut std::io::stdout(),
            )?;
        }
    }

    Ok(())
}
