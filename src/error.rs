//! Error types for the game engine.

use thiserror::Error;

use crate::game::{Occupant, Position};

/// Failures surfaced by grid, index, resolver and strategy operations.
///
/// Every variant is a local, synchronous failure: the operation that returns it
/// has applied no state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Position lies outside `[0, width) x [0, height)`.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width in columns.
        width: u16,
        /// Grid height in rows.
        height: u16,
    },
    /// Placement onto a cell that already holds an occupant.
    #[error("position {position} is already occupied by {occupant}")]
    PositionOccupied {
        /// The target position.
        position: Position,
        /// The occupant already in the cell.
        occupant: Occupant,
    },
    /// The occupant is not present in any grid cell.
    #[error("{0} is not on the grid")]
    NotFound(Occupant),
    /// Every flag on the map has been captured.
    #[error("there are no uncaptured flags")]
    NoUncapturedFlags,
    /// The textual map layout could not be parsed.
    #[error("malformed map at line {line}: {reason}")]
    MalformedMap {
        /// 1-based line number where parsing stopped (0 for whole-input problems).
        line: usize,
        /// Description of the problem.
        reason: String,
    },
    /// An occupant combination the rules never produce.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
