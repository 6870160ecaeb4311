//! Flagwar CLI - Command-line interface for running flag war simulations.

// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Flagwar - A deterministic rock-paper-scissors capture-the-flag simulation
#[derive(Parser, Debug)]
#[command(name = "flagwar")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine activity (sets the default log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single game on a map file
    Run {
        /// Map file (R, P, S, F and '.' per cell)
        #[arg(required = true)]
        map: PathBuf,

        /// Maximum cycles (overrides the config file)
        #[arg(short, long)]
        cycles: Option<u32>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress cycle-by-cycle output
        #[arg(short, long)]
        quiet: bool,

        /// Print the map after every cycle
        #[arg(long)]
        show_map: bool,
    },

    /// Run many generated games in parallel and aggregate statistics
    Batch {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Map width (default: 16)
        #[arg(long, default_value = "16")]
        width: u16,

        /// Map height (default: 12)
        #[arg(long, default_value = "12")]
        height: u16,

        /// Players per team (default: 3)
        #[arg(long, default_value = "3")]
        players: u16,

        /// Flags per map (default: 4)
        #[arg(long, default_value = "4")]
        flags: u16,

        /// Maximum cycles per game (overrides the config file)
        #[arg(short, long)]
        cycles: Option<u32>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Validate a map file
    Validate {
        /// Map file to validate
        #[arg(required = true)]
        map: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match args.command {
        Commands::Run {
            map,
            cycles,
            config,
            format,
            quiet,
            show_map,
        } => cli::run::execute(&map, cycles, config.as_deref(), format, quiet, show_map),

        Commands::Batch {
            games,
            seed,
            width,
            height,
            players,
            flags,
            cycles,
            config,
            threads,
            format,
            progress,
        } => {
            let map = flagwar::simulation::MapGenConfig {
                width,
                height,
                players_per_team: players,
                flags,
            };
            cli::batch::execute(
                games,
                seed,
                map,
                cycles,
                config.as_deref(),
                threads,
                format,
                progress,
            )
        }

        Commands::Validate { map } => cli::validate::execute(&map),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
