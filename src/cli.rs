//! CLI command implementations for Flagwar.

pub(crate) mod batch;
pub(crate) mod run;
pub(crate) mod validate;

mod output;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use flagwar::simulation::{SimConfig, SimulationError};
use flagwar::GameError;
use thiserror::Error;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A map file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The map file is not a valid layout.
    #[error("Invalid map {}: {source}", path.display())]
    Map {
        /// File that failed.
        path: PathBuf,
        /// Parse error.
        source: GameError,
    },
    /// Simulation or configuration failure.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Engine failure while running a game.
    #[error(transparent)]
    Game(#[from] GameError),
    /// Output could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// A map file parsed but breaks a game rule.
    #[error("{0}")]
    Invalid(String),
}

/// Read a map file into memory.
pub(crate) fn read_map(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the configuration file if given, then apply the cycle override.
pub(crate) fn load_config(path: Option<&Path>, cycles: Option<u32>) -> Result<SimConfig, CliError> {
    let mut config = match path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(cycles) = cycles {
        config.max_cycles = cycles;
    }
    Ok(config)
}
