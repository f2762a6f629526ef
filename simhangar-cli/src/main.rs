//! SimHangar CLI - Command-line interface
//!
//! Thin consumer of the simhangar library: builds the aircraft index and
//! answers title lookups from the terminal, printing the same JSON
//! responses a telemetry client would receive.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "simhangar",
    version,
    about = "Aircraft package indexer for Microsoft Flight Simulator"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover content roots and build the aircraft index
    Scan,
    /// Resolve a title to package metadata
    Find {
        /// Title to look up, as reported by simulator telemetry
        title: String,
        /// Request id echoed back in the response
        #[arg(long, default_value = "cli")]
        request_id: String,
    },
    /// Show discovered paths and index status
    Paths,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "starting");

    let result = match cli.command {
        Commands::Scan => commands::scan::run(),
        Commands::Find { title, request_id } => commands::find::run(&title, &request_id),
        Commands::Paths => commands::paths::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
