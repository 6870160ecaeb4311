//! Players, flags and the occupant handle shared by the grid.
//!
//! The rosters in [`GameState`](crate::game::GameState) own every player and
//! flag. The grid only stores [`Occupant`] handles, which index into those
//! rosters, so a player removed from the grid still exists in its roster.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Direction;

/// Index of a player in the player roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub usize);

/// Index of a flag in the flag roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FlagId(pub usize);

/// Anything that can exist in a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// A player, by roster index.
    Player(PlayerId),
    /// A flag, by roster index.
    Flag(FlagId),
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Player(PlayerId(id)) => write!(f, "player #{id}"),
            Occupant::Flag(FlagId(id)) => write!(f, "flag #{id}"),
        }
    }
}

/// The three teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    /// Beats Scissors, loses to Paper.
    Rock,
    /// Beats Rock, loses to Scissors.
    Paper,
    /// Beats Paper, loses to Rock.
    Scissors,
}

impl Team {
    /// All teams in a fixed order.
    pub const ALL: [Team; 3] = [Team::Rock, Team::Paper, Team::Scissors];

    /// Map layout character for a living player of this team.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Team::Rock => 'R',
            Team::Paper => 'P',
            Team::Scissors => 'S',
        }
    }

    /// Parse a map layout character, `None` if it is not a team glyph.
    #[must_use]
    pub const fn from_glyph(c: char) -> Option<Self> {
        match c {
            'R' => Some(Team::Rock),
            'P' => Some(Team::Paper),
            'S' => Some(Team::Scissors),
            _ => None,
        }
    }

    /// Stable index used by lookup tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::Rock => 0,
            Team::Paper => 1,
            Team::Scissors => 2,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Team::Rock => "Rock",
            Team::Paper => "Paper",
            Team::Scissors => "Scissors",
        };
        f.write_str(name)
    }
}

/// Heading a freshly created player remembers.
pub const DEFAULT_HEADING: Direction = Direction::Right;

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Team membership, fixed for the player's lifetime.
    pub team: Team,
    /// Whether the player still takes part in cycles.
    pub alive: bool,
    /// Number of flags this player has captured.
    pub captured_flags: u32,
    /// Number of opponents this player has defeated.
    pub killed_players: u32,
    /// Last direction this player requested.
    pub heading: Direction,
}

impl Player {
    /// Create a living player with zeroed counters.
    #[must_use]
    pub fn new(name: impl Into<String>, team: Team) -> Self {
        Self {
            name: name.into(),
            team,
            alive: true,
            captured_flags: 0,
            killed_players: 0,
            heading: DEFAULT_HEADING,
        }
    }

    /// Map layout character for this player (`X` once dead).
    #[must_use]
    pub const fn glyph(&self) -> char {
        if self.alive { self.team.glyph() } else { 'X' }
    }

    /// Eliminate this player.
    pub fn eliminate(&mut self) {
        self.alive = false;
    }
}

/// A capturable flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag {
    /// Set once a player steps onto the flag; never reset.
    pub captured: bool,
}

impl Flag {
    /// Layout character of an uncaptured flag.
    pub const GLYPH: char = 'F';

    /// Create an uncaptured flag.
    #[must_use]
    pub const fn new() -> Self {
        Self { captured: false }
    }

    /// Mark the flag as captured.
    pub fn capture(&mut self) {
        self.captured = true;
    }
}
