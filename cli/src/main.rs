//! tally - resource-spend attribution for combat log replays

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

mod commands;
mod format;

#[derive(Parser)]
#[command(version, about = "Attribute resource spend to combat outcomes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recording and print the spender efficiency table
    Report {
        #[arg(short, long)]
        log: PathBuf,
        #[arg(short, long)]
        profile: PathBuf,
        /// Tracked actor id; defaults to the source of the first cast
        #[arg(short, long)]
        actor: Option<i64>,
    },
    /// Load and validate an attribution profile
    Validate {
        #[arg(short, long)]
        profile: PathBuf,
    },
    /// List the abilities present in a recording
    Abilities {
        #[arg(short, long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Report {
            log,
            profile,
            actor,
        } => commands::report(&log, &profile, actor),
        Commands::Validate { profile } => commands::validate(&profile),
        Commands::Abilities { log } => commands::abilities(&log),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
