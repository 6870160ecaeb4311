//! Game invariants - sanity checks that detect bugs.
//!
//! The resolver keeps these true after every move. A violation means the
//! engine, or code that mutated the state by hand, has a bug.

use std::collections::HashMap;

use thiserror::Error;

use crate::error::GameError;
use crate::game::{FlagId, GameState, Occupant, PlayerId};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl From<InvariantViolation> for GameError {
    fn from(v: InvariantViolation) -> Self {
        GameError::InvariantViolation(v.message)
    }
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold:
/// - every grid handle refers to an existing roster entry and appears once
/// - living players and uncaptured flags are on the grid
/// - dead players and captured flags are not
/// - captures and kills recorded on players match flag and death counts
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen: HashMap<Occupant, usize> = HashMap::new();

    for (position, occupant) in state.grid.occupied() {
        *seen.entry(occupant).or_default() += 1;

        let known = match occupant {
            Occupant::Player(id) => state.player(id).is_some(),
            Occupant::Flag(id) => state.flag(id).is_some(),
        };
        if !known {
            violations.push(InvariantViolation {
                message: format!("Cell {position} references unknown {occupant}"),
            });
        }
    }

    for (occupant, count) in &seen {
        if *count > 1 {
            violations.push(InvariantViolation {
                message: format!("{occupant} occupies {count} cells"),
            });
        }
    }

    for (i, player) in state.players.iter().enumerate() {
        let on_grid = seen.contains_key(&Occupant::Player(PlayerId(i)));
        if player.alive && !on_grid {
            violations.push(InvariantViolation {
                message: format!("Living player #{i} ({}) is not on the grid", player.name),
            });
        }
        if !player.alive && on_grid {
            violations.push(InvariantViolation {
                message: format!("Dead player #{i} ({}) is still on the grid", player.name),
            });
        }
    }

    for (i, flag) in state.flags.iter().enumerate() {
        let on_grid = seen.contains_key(&Occupant::Flag(FlagId(i)));
        if !flag.captured && !on_grid {
            violations.push(InvariantViolation {
                message: format!("Uncaptured flag #{i} is not on the grid"),
            });
        }
        if flag.captured && on_grid {
            violations.push(InvariantViolation {
                message: format!("Captured flag #{i} is still on the grid"),
            });
        }
    }

    let captures: u64 = state.players.iter().map(|p| u64::from(p.captured_flags)).sum();
    let captured = state.flags.iter().filter(|f| f.captured).count() as u64;
    if captures != captured {
        violations.push(InvariantViolation {
            message: format!("Players hold {captures} captures but {captured} flags are captured"),
        });
    }

    let kills: u64 = state.players.iter().map(|p| u64::from(p.killed_players)).sum();
    let dead = state.players.iter().filter(|p| !p.alive).count() as u64;
    if kills != dead {
        violations.push(InvariantViolation {
            message: format!("Players hold {kills} kills but {dead} players are dead"),
        });
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        for message in &messages {
            log::warn!("{message}");
        }
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
