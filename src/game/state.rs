//! Game state: the grid plus the player and flag rosters.

use std::str::FromStr;

use crate::error::{GameError, GameResult};
use crate::game::{Flag, FlagId, Grid, NamePool, Occupant, Player, PlayerId, Position, Team};

/// Complete simulation state.
///
/// The rosters own every entity; the grid holds [`Occupant`] handles into them.
/// Roster order is the order entities were added, which for a parsed map is
/// row-major layout order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Cell store, the single source of truth for where things are.
    pub grid: Grid,
    /// All players, dead ones included.
    pub players: Vec<Player>,
    /// All flags, captured ones included.
    pub flags: Vec<Flag>,
}

impl GameState {
    /// Create a state with an empty grid and empty rosters.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            players: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Build a state from a textual map layout.
    ///
    /// `R`, `P` and `S` are living players, `F` is an uncaptured flag and any
    /// other character is an empty cell. Every line must have the length of the
    /// first one. Trailing line breaks are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MalformedMap`] for empty input, ragged lines or a
    /// layout larger than `u16::MAX` in either direction.
    pub fn parse(layout: &str) -> GameResult<Self> {
        let rows: Vec<&str> = layout.trim_end_matches(['\n', '\r']).lines().collect();

        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(GameError::MalformedMap {
                line: 0,
                reason: "layout is empty".to_string(),
            });
        }

        let too_large = |what: &str| GameError::MalformedMap {
            line: 0,
            reason: format!("layout {what} exceeds {}", u16::MAX),
        };
        let grid_width = u16::try_from(width).map_err(|_| too_large("width"))?;
        let grid_height = u16::try_from(rows.len()).map_err(|_| too_large("height"))?;

        for (i, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GameError::MalformedMap {
                    line: i + 1,
                    reason: format!("expected {width} columns, found {found}"),
                });
            }
        }

        let grid = Grid::new(grid_width, grid_height).ok_or_else(|| too_large("size"))?;
        let mut state = Self::new(grid);
        let mut names = NamePool::new();

        for (y, row) in (0_i32..).zip(rows.iter()) {
            for (x, c) in (0_i32..).zip(row.chars()) {
                let position = Position::new(x, y);
                if let Some(team) = Team::from_glyph(c) {
                    state.add_player(Player::new(names.next_name(), team), position)?;
                } else if c == Flag::GLYPH {
                    state.add_flag(position)?;
                }
            }
        }

        Ok(state)
    }

    /// Add a player to the roster and place it on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::PositionOccupied`] if
    /// the player cannot be placed; the roster is left unchanged.
    pub fn add_player(&mut self, player: Player, position: Position) -> GameResult<PlayerId> {
        let id = PlayerId(self.players.len());
        self.grid.set(Occupant::Player(id), position)?;
        self.players.push(player);
        Ok(id)
    }

    /// Add an uncaptured flag to the roster and place it on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] or [`GameError::PositionOccupied`] if
    /// the flag cannot be placed; the roster is left unchanged.
    pub fn add_flag(&mut self, position: Position) -> GameResult<FlagId> {
        let id = FlagId(self.flags.len());
        self.grid.set(Occupant::Flag(id), position)?;
        self.flags.push(Flag::new());
        Ok(id)
    }

    /// Get a player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    /// Get a mutable reference to a player by ID.
    #[must_use]
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.0)
    }

    /// Get a flag by ID.
    #[must_use]
    pub fn flag(&self, id: FlagId) -> Option<&Flag> {
        self.flags.get(id.0)
    }

    /// Get a mutable reference to a flag by ID.
    #[must_use]
    pub fn flag_mut(&mut self, id: FlagId) -> Option<&mut Flag> {
        self.flags.get_mut(id.0)
    }

    /// IDs of all players in roster order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + use<> {
        (0..self.players.len()).map(PlayerId)
    }

    /// All living players in roster order.
    pub fn living_players(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alive)
            .map(|(i, p)| (PlayerId(i), p))
    }

    /// All uncaptured flags in roster order.
    pub fn uncaptured_flags(&self) -> impl Iterator<Item = (FlagId, &Flag)> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.captured)
            .map(|(i, f)| (FlagId(i), f))
    }

    /// Check if every flag has been captured.
    #[must_use]
    pub fn all_flags_captured(&self) -> bool {
        self.flags.iter().all(|f| f.captured)
    }

    /// Position of a player on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the player is not on the grid.
    pub fn position_of(&self, id: PlayerId) -> GameResult<Position> {
        self.grid.position_of(Occupant::Player(id))
    }

    /// Position of the uncaptured flag closest to a player.
    ///
    /// Distance is Manhattan distance. Ties go to the flag that comes first in
    /// the roster. Flags are found in a single pass over the occupied cells.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the player is not on the grid and
    /// [`GameError::NoUncapturedFlags`] if no uncaptured flag is on the grid.
    pub fn nearest_flag_position(&self, id: PlayerId) -> GameResult<Position> {
        let from = self.position_of(id)?;

        self.grid
            .occupied()
            .filter_map(|(position, occupant)| match occupant {
                Occupant::Flag(flag_id) if self.flag(flag_id).is_some_and(|f| !f.captured) => {
                    Some((from.manhattan_distance(position), flag_id, position))
                }
                _ => None,
            })
            .min_by_key(|&(distance, flag_id, _)| (distance, flag_id))
            .map(|(_, _, position)| position)
            .ok_or(GameError::NoUncapturedFlags)
    }
}

impl FromStr for GameState {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
