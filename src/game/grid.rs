//! Grid cell store, positions and directions.

use std::fmt;

use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::game::Occupant;

/// A cell position on the grid.
///
/// `x` is the column and `y` the row; `(0, 0)` is the top-left character of the
/// map layout. Coordinates are signed so that a step off the edge is still a
/// representable position that simply fails the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one step in `direction`.
    ///
    /// The result may lie outside the grid.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Number of single steps needed to get from `self` to `other`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The `(dx, dy)` offset of a single step.
    #[must_use]
    pub const fn unit_vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Fixed-size 2D store holding at most one occupant per cell.
///
/// The grid enforces nothing across cells: relocating an occupant means
/// clearing its old cell and setting the new one, which is the resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Option<Occupant>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            cells: vec![None; size],
        })
    }

    /// Width of the grid in columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the grid in rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check if a position lies within `[0, width) x [0, height)`.
    #[must_use]
    pub fn within_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Convert a position to an index into the cell vector.
    fn index(&self, position: Position) -> GameResult<usize> {
        if !self.within_bounds(position) {
            return Err(self.out_of_bounds(position));
        }
        // Both coordinates are non-negative and below u16::MAX here.
        let x = usize::try_from(position.x).map_err(|_| self.out_of_bounds(position))?;
        let y = usize::try_from(position.y).map_err(|_| self.out_of_bounds(position))?;
        Ok(y * usize::from(self.width) + x)
    }

    fn out_of_bounds(&self, position: Position) -> GameError {
        GameError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the occupant at a position, `None` for an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if the position is outside the grid.
    pub fn get(&self, position: Position) -> GameResult<Option<Occupant>> {
        let idx = self.index(position)?;
        Ok(self.cells[idx])
    }

    /// Place an occupant at a position.
    ///
    /// Does not clear any previous cell of the occupant.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if the position is outside the grid and
    /// [`GameError::PositionOccupied`] if the cell is not empty.
    pub fn set(&mut self, occupant: Occupant, position: Position) -> GameResult<()> {
        let idx = self.index(position)?;
        if let Some(existing) = self.cells[idx] {
            return Err(GameError::PositionOccupied {
                position,
                occupant: existing,
            });
        }
        self.cells[idx] = Some(occupant);
        Ok(())
    }

    /// Empty the cell at a position, whatever it held.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if the position is outside the grid.
    pub fn clear(&mut self, position: Position) -> GameResult<()> {
        let idx = self.index(position)?;
        self.cells[idx] = None;
        Ok(())
    }

    /// Iterate over all positions and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<Occupant>)> + '_ {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            // Indices are bounded by u16::MAX * u16::MAX, so each axis fits in i32.
            let x = i32::try_from(idx % width).unwrap_or(i32::MAX);
            let y = i32::try_from(idx / width).unwrap_or(i32::MAX);
            (Position::new(x, y), *cell)
        })
    }

    /// Iterate over the non-empty cells only.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        self.iter()
            .filter_map(|(position, cell)| cell.map(|occupant| (position, occupant)))
    }
}
