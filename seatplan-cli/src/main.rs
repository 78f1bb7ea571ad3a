//! # seatplan CLI
//!
//! Command-line interface for the seatplan theater seat allocator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seatplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to seatplan.yml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate seats for every request in a file
    Reserve {
        /// Request file, one "<id> <quantity>" per line
        input: PathBuf,

        /// Output file (defaults to output.path from the config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print records, summary and grid as JSON instead of the grid dump
        #[arg(long)]
        json: bool,

        /// Skip printing the final grid
        #[arg(long)]
        no_dump: bool,
    },

    /// Write a starter seatplan.yml
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Reserve {
            input,
            output,
            json,
            no_dump,
        } => {
            let opts = commands::ReserveOptions {
                output,
                json,
                no_dump,
            };
            commands::reserve_seats(cli.config.as_deref(), &input, opts)
        }
        Commands::Init { path } => commands::init_project(path.as_deref()),
    }
}
