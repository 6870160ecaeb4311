//! Movement and combat resolution, the turn engine.
//!
//! [`attempt_move`] is the only operation that relocates players. All checks
//! run before the first cell is touched, so a call either applies every effect
//! of the move or none of them.

use log::debug;
use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::game::{Direction, FlagId, GameState, Occupant, Outcome, PlayerId, Position, Team};

/// What a single move attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// The target lies outside the grid; nothing changed.
    OffGrid,
    /// The mover stepped into an empty cell.
    Moved {
        /// The mover's new position.
        to: Position,
    },
    /// The mover captured a flag and now stands on its cell.
    Captured {
        /// The captured flag.
        flag: FlagId,
        /// The mover's new position.
        to: Position,
    },
    /// The mover defeated the defender and took its cell.
    Won {
        /// The defeated player.
        defender: PlayerId,
        /// The mover's new position.
        to: Position,
    },
    /// The defender defeated the mover and advanced into the mover's cell.
    Lost {
        /// The winning player.
        defender: PlayerId,
        /// The defender's new position.
        defender_to: Position,
    },
    /// Same-team encounter; nobody moved.
    Stalemate {
        /// The player occupying the target cell.
        other: PlayerId,
    },
}

fn violation(message: String) -> GameError {
    GameError::InvariantViolation(message)
}

/// Attempt to move `mover` one step from `from` in `direction`.
///
/// - Off-grid target: no-op.
/// - Empty target: the mover relocates.
/// - Uncaptured flag: the flag leaves the grid for good, the mover takes its
///   cell and its capture count goes up.
/// - Another player: teams are adjudicated. The winner ends up in the target
///   cell if the mover won, or in the mover's cell if the defender won; the
///   loser is marked dead and leaves the grid. Same team is a no-op.
///
/// # Errors
///
/// Returns [`GameError::OutOfBounds`] if `from` is outside the grid and
/// [`GameError::InvariantViolation`] if the mover is not a living player at
/// `from`, or the target holds a dead player or captured flag. No state is
/// changed when an error is returned.
pub fn attempt_move(
    state: &mut GameState,
    mover: PlayerId,
    from: Position,
    direction: Direction,
) -> GameResult<MoveOutcome> {
    let mover_team = match state.player(mover) {
        Some(player) if player.alive => player.team,
        Some(_) => return Err(violation(format!("dead player #{} asked to move", mover.0))),
        None => return Err(violation(format!("player #{} is not in the roster", mover.0))),
    };
    if state.grid.get(from)? != Some(Occupant::Player(mover)) {
        return Err(violation(format!("player #{} is not at {from}", mover.0)));
    }

    let target = from.step(direction);
    if !state.grid.within_bounds(target) {
        debug!("player #{} at {from} bumps into the edge going {direction:?}", mover.0);
        return Ok(MoveOutcome::OffGrid);
    }

    match state.grid.get(target)? {
        None => {
            state.grid.clear(from)?;
            state.grid.set(Occupant::Player(mover), target)?;
            debug!("player #{} moves {from} -> {target}", mover.0);
            Ok(MoveOutcome::Moved { to: target })
        }
        Some(Occupant::Flag(flag)) => capture_flag(state, mover, from, target, flag),
        Some(Occupant::Player(defender)) => fight(state, mover, mover_team, from, target, defender),
    }
}

fn capture_flag(
    state: &mut GameState,
    mover: PlayerId,
    from: Position,
    target: Position,
    flag: FlagId,
) -> GameResult<MoveOutcome> {
    match state.flag(flag) {
        Some(f) if !f.captured => {}
        Some(_) => return Err(violation(format!("captured flag #{} still at {target}", flag.0))),
        None => return Err(violation(format!("flag #{} is not in the roster", flag.0))),
    }

    state.grid.clear(from)?;
    state.grid.clear(target)?;
    state.grid.set(Occupant::Player(mover), target)?;

    if let Some(player) = state.player_mut(mover) {
        player.captured_flags += 1;
    }
    if let Some(f) = state.flag_mut(flag) {
        f.capture();
    }

    debug!("player #{} captures flag #{} at {target}", mover.0, flag.0);
    Ok(MoveOutcome::Captured { flag, to: target })
}

fn fight(
    state: &mut GameState,
    mover: PlayerId,
    mover_team: Team,
    from: Position,
    target: Position,
    defender: PlayerId,
) -> GameResult<MoveOutcome> {
    let defender_team = match state.player(defender) {
        Some(player) if player.alive && defender != mover => player.team,
        Some(_) => {
            return Err(violation(format!(
                "player #{} at {target} cannot be fought by player #{}",
                defender.0, mover.0
            )));
        }
        None => return Err(violation(format!("player #{} is not in the roster", defender.0))),
    };

    match mover_team.resolve(defender_team) {
        Outcome::Win => {
            state.grid.clear(target)?;
            state.grid.clear(from)?;
            state.grid.set(Occupant::Player(mover), target)?;
            if let Some(loser) = state.player_mut(defender) {
                loser.eliminate();
            }
            if let Some(winner) = state.player_mut(mover) {
                winner.killed_players += 1;
            }
            debug!(
                "player #{} ({mover_team}) defeats player #{} ({defender_team}) at {target}",
                mover.0, defender.0
            );
            Ok(MoveOutcome::Won { defender, to: target })
        }
        Outcome::Loss => {
            state.grid.clear(from)?;
            state.grid.clear(target)?;
            state.grid.set(Occupant::Player(defender), from)?;
            if let Some(loser) = state.player_mut(mover) {
                loser.eliminate();
            }
            if let Some(winner) = state.player_mut(defender) {
                winner.killed_players += 1;
            }
            debug!(
                "player #{} ({defender_team}) repels player #{} ({mover_team}) and advances to {from}",
                defender.0, mover.0
            );
            Ok(MoveOutcome::Lost {
                defender,
                defender_to: from,
            })
        }
        Outcome::Draw => {
            debug!("player #{} and player #{} are teammates, no fight", mover.0, defender.0);
            Ok(MoveOutcome::Stalemate { other: defender })
        }
    }
}
