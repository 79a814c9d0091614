mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "holiday-picker")]
#[command(about = "Company holiday calendar: public and work holidays from Google Calendar")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to Google and store the session
    Auth,
    /// Show a month with its holidays highlighted (default)
    Show {
        /// Month to show (1-12), defaults to the selected day's month
        #[arg(short, long)]
        month: Option<u32>,

        /// Day to select (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        select: Option<NaiveDate>,
    },
    /// List every holiday of the year
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up the holiday on a single day
    Lookup {
        /// Day to look up (YYYY-MM-DD)
        date: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command.unwrap_or(Commands::Show {
        month: None,
        select: None,
    }) {
        Commands::Auth => commands::auth::run().await,
        Commands::Show { month, select } => commands::show::run(month, select).await,
        Commands::List { json } => commands::list::run(json).await,
        Commands::Lookup { date } => commands::lookup::run(date).await,
    }
}

/// Logs go to stderr so they never mix with the rendered calendar.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
