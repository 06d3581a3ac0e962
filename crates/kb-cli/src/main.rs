//! CLI frontend for the knucklebone throw simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kb",
    about = "Throw five knucklebones and score the result",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Throw one or more rounds and print their outcomes
    Throw {
        /// RNG seed for deterministic throws
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of rounds to throw
        #[arg(short, long, default_value = "1")]
        rounds: u32,

        /// Dice setup file (default: the classic astragalus)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show the event log of every round
        #[arg(short, long)]
        verbose: bool,

        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,

        /// Refuse setups where a valued face has no anchor direction
        #[arg(long)]
        strict: bool,
    },

    /// Throw many rounds and report face and combination frequencies
    Stats {
        /// RNG seed for deterministic throws
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Number of rounds to throw
        #[arg(short, long, default_value = "100")]
        rounds: u32,

        /// Dice setup file (default: the classic astragalus)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a dice setup file
    Check {
        /// Dice setup file to validate
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Write the classic dice setup to a new file
    Init {
        /// Path of the file to create
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Throw {
            seed,
            rounds,
            config,
            verbose,
            json,
            strict,
        } => commands::throw::run(config.as_deref(), seed, rounds, verbose, json, strict),
        Commands::Stats {
            seed,
            rounds,
            config,
        } => commands::stats::run(config.as_deref(), seed, rounds),
        Commands::Check { config } => commands::check::run(&config),
        Commands::Init { path } => commands::init::run(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
