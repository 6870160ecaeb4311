//! Per-player decision policies.
//!
//! A strategy only reads the state and answers with at most one direction per
//! cycle; the driver feeds that direction to the resolver.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::game::{Direction, GameState, Occupant, Outcome, Player, PlayerId, Position};

/// Decision policy a team plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Walk towards the nearest uncaptured flag.
    SeekFlag,
    /// Look at the cell in the remembered heading first: attack a weaker
    /// opponent there, back away from a stronger one, otherwise seek a flag.
    Reactive,
}

/// Direction of the single step that reduces the distance from `from` to `to`.
///
/// The axis with the larger absolute delta is reduced first; on a tie the
/// horizontal axis goes first. Returns `None` when both positions are equal.
#[must_use]
pub fn direction_toward(from: Position, to: Position) -> Option<Direction> {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);

    if dx == 0 && dy == 0 {
        return None;
    }

    if dx.abs() >= dy.abs() {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

impl Strategy {
    /// Choose this cycle's direction for a player.
    ///
    /// Returns `Ok(None)` when the player abstains: it is dead, no uncaptured
    /// flags remain, or a reactive retreat would leave the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if a living player is missing from the
    /// grid and [`GameError::InvariantViolation`] if the grid references a
    /// player outside the roster.
    pub fn decide(self, state: &GameState, id: PlayerId) -> GameResult<Option<Direction>> {
        let player = state.player(id).ok_or_else(|| {
            GameError::InvariantViolation(format!("player #{} is not in the roster", id.0))
        })?;
        if !player.alive {
            return Ok(None);
        }

        let from = state.position_of(id)?;
        let decision = match self {
            Strategy::SeekFlag => seek_flag(state, id, from)?,
            Strategy::Reactive => react(state, id, player, from)?,
        };

        trace!("player #{} ({self:?}) at {from} decides {decision:?}", id.0);
        Ok(decision)
    }
}

fn seek_flag(state: &GameState, id: PlayerId, from: Position) -> GameResult<Option<Direction>> {
    match state.nearest_flag_position(id) {
        Ok(flag) => Ok(direction_toward(from, flag)),
        Err(GameError::NoUncapturedFlags) => Ok(None),
        Err(e) => Err(e),
    }
}

fn react(
    state: &GameState,
    id: PlayerId,
    player: &Player,
    from: Position,
) -> GameResult<Option<Direction>> {
    let heading = player.heading;

    let Some((_, Some(Occupant::Player(other_id)))) = state.grid.neighbour(from, heading) else {
        return seek_flag(state, id, from);
    };
    let other = state.player(other_id).ok_or_else(|| {
        GameError::InvariantViolation(format!("player #{} is not in the roster", other_id.0))
    })?;

    match player.team.resolve(other.team) {
        Outcome::Win => Ok(Some(heading)),
        Outcome::Loss => {
            // Back away; whatever sits behind gets attacked by the resolver.
            let retreat = heading.inverted();
            if state.grid.within_bounds(from.step(retreat)) {
                Ok(Some(retreat))
            } else {
                Ok(None)
            }
        }
        Outcome::Draw => seek_flag(state, id, from),
    }
}
