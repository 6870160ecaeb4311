//! Occupant and position queries over the grid.
//!
//! Lookup is by handle identity, so two players with the same team and name
//! still resolve to their own cells.

use crate::error::{GameError, GameResult};
use crate::game::{Direction, Grid, Occupant, Position};

impl Grid {
    /// Find the cell holding `occupant`.
    ///
    /// Linear scan in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the occupant is in no cell.
    pub fn position_of(&self, occupant: Occupant) -> GameResult<Position> {
        self.occupied()
            .find(|&(_, cell)| cell == occupant)
            .map(|(position, _)| position)
            .ok_or(GameError::NotFound(occupant))
    }

    /// Occupant at `position`, `None` for an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if the position is outside the grid.
    pub fn occupant_at(&self, position: Position) -> GameResult<Option<Occupant>> {
        self.get(position)
    }

    /// Look one step from `position` in `direction`.
    ///
    /// Returns `None` when that step leaves the grid, otherwise the neighbouring
    /// position and its occupant.
    #[must_use]
    pub fn neighbour(
        &self,
        position: Position,
        direction: Direction,
    ) -> Option<(Position, Option<Occupant>)> {
        let target = position.step(direction);
        self.get(target).ok().map(|cell| (target, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FlagId, PlayerId};

    #[test]
    fn test_position_of() {
        let mut grid = Grid::new(5, 5).unwrap();
        let a = Occupant::Player(PlayerId(0));
        let b = Occupant::Player(PlayerId(1));
        grid.set(a, Position::new(1, 2)).unwrap();
        grid.set(b, Position::new(4, 0)).unwrap();

        assert_eq!(grid.position_of(a).unwrap(), Position::new(1, 2));
        assert_eq!(grid.position_of(b).unwrap(), Position::new(4, 0));
    }

    #[test]
    fn test_position_of_not_found() {
        let mut grid = Grid::new(3, 3).unwrap();
        let flag = Occupant::Flag(FlagId(0));
        assert_eq!(grid.position_of(flag), Err(GameError::NotFound(flag)));

        grid.set(flag, Position::new(0, 0)).unwrap();
        grid.clear(Position::new(0, 0)).unwrap();
        assert_eq!(grid.position_of(flag), Err(GameError::NotFound(flag)));
    }

    #[test]
    fn test_occupant_at() {
        let mut grid = Grid::new(2, 2).unwrap();
        let p = Occupant::Player(PlayerId(7));
        grid.set(p, Position::new(1, 1)).unwrap();

        assert_eq!(grid.occupant_at(Position::new(1, 1)).unwrap(), Some(p));
        assert_eq!(grid.occupant_at(Position::new(0, 1)).unwrap(), None);
        assert!(matches!(
            grid.occupant_at(Position::new(2, 2)),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_neighbour() {
        let mut grid = Grid::new(3, 1).unwrap();
        let p = Occupant::Player(PlayerId(0));
        grid.set(p, Position::new(2, 0)).unwrap();

        let origin = Position::new(1, 0);
        assert_eq!(grid.neighbour(origin, Direction::Right), Some((Position::new(2, 0), Some(p))));
        assert_eq!(grid.neighbour(origin, Direction::Left), Some((Position::new(0, 0), None)));
        assert_eq!(grid.neighbour(origin, Direction::Up), None);
        assert_eq!(grid.neighbour(origin, Direction::Down), None);
    }
}
