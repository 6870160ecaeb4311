// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Flagwar: a deterministic rock-paper-scissors capture-the-flag simulation.
//!
//! Players of three teams (Rock, Paper, Scissors) move one cell per cycle on a
//! bounded grid, capture flags, and fight opposing players with
//! rock-paper-scissors adjudication.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / Reporting (text, JSON)      │
//! ├─────────────────────────────────────┤
//! │   Simulation driver (cycles)        │
//! ├─────────────────────────────────────┤
//! │   Strategies  │  Move resolver      │
//! ├─────────────────────────────────────┤
//! │   Grid + rosters (GameState)        │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use flagwar::simulation::{SimConfig, run_simulation};
//!
//! let result = run_simulation("R.F\n...", &SimConfig::default()).unwrap();
//! assert_eq!(result.flags_captured, 1);
//! ```

pub mod error;
pub mod game;
pub mod report;
pub mod simulation;

pub use error::{GameError, GameResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Direction, Flag, FlagId, GameState, Grid, MoveOutcome, Occupant, Player, PlayerId, Position,
    Strategy, Team, attempt_move,
};
pub use simulation::{SimConfig, SimResult, Simulation, SimulationError, run_simulation};
