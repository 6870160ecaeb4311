//! Game layer for flagwar.
//!
//! Implements the capture-the-flag rules:
//! - Grid with at most one occupant per cell
//! - Player and flag rosters owning every entity
//! - Rock-paper-scissors combat adjudication
//! - Movement resolution (moves, flag captures, fights)
//! - Decision strategies and scoring

mod combat;
mod entity;
mod grid;
mod index;
mod invariants;
mod names;
mod resolver;
mod scoreboard;
mod state;
mod strategy;

pub use combat::Outcome;
pub use entity::{DEFAULT_HEADING, Flag, FlagId, Occupant, Player, PlayerId, Team};
pub use grid::{Direction, Grid, Position};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use names::NamePool;
pub use resolver::{MoveOutcome, attempt_move};
pub use scoreboard::{
    ScoringWeights, dead_player_count, ranked_players, ranked_players_in_team, team_score,
    team_scores, winning_team,
};
pub use state::GameState;
pub use strategy::{Strategy, direction_toward};
