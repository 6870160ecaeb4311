//! Deterministic map generation for batch runs.
//!
//! Generated maps are emitted in the same textual layout that
//! [`GameState::parse`](crate::game::GameState::parse) reads, so a generated
//! game and a hand-written one go through identical setup.

// Map generation uses intentional casts for RNG operations
#![allow(clippy::cast_possible_truncation)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{Flag, Team};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random index in [0, max).
    fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }
}

/// Error type for map generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Map generation error: {reason}")]
pub struct MapGenError {
    /// Description of the error.
    pub reason: String,
}

/// Shape and population of a generated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGenConfig {
    /// Map width in columns.
    pub width: u16,
    /// Map height in rows.
    pub height: u16,
    /// Players placed for each of the three teams.
    pub players_per_team: u16,
    /// Number of flags.
    pub flags: u16,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 12,
            players_per_team: 3,
            flags: 4,
        }
    }
}

/// Generate a map layout from a seed.
///
/// Players are placed team by team (Rock, Paper, Scissors), then flags, each on
/// a distinct random cell. The same seed and config always give the same layout.
///
/// # Errors
///
/// Returns an error if a dimension is zero or the entities do not fit.
pub fn generate_map(seed: u64, config: &MapGenConfig) -> Result<String, MapGenError> {
    if config.width == 0 || config.height == 0 {
        return Err(MapGenError {
            reason: "Invalid map dimensions (must be > 0)".to_string(),
        });
    }

    let width = usize::from(config.width);
    let cells = width * usize::from(config.height);
    let entities = 3 * usize::from(config.players_per_team) + usize::from(config.flags);
    if entities > cells {
        return Err(MapGenError {
            reason: format!("{entities} entities do not fit on {cells} cells"),
        });
    }

    let mut rng = Rng::new(seed);

    // Partial Fisher-Yates: the first `entities` slots become the placements
    let mut slots: Vec<usize> = (0..cells).collect();
    for i in 0..entities {
        let j = i + rng.next_index(cells - i);
        slots.swap(i, j);
    }

    let mut layout = vec!['.'; cells];
    let glyphs = Team::ALL
        .iter()
        .flat_map(|team| std::iter::repeat_n(team.glyph(), usize::from(config.players_per_team)))
        .chain(std::iter::repeat_n(Flag::GLYPH, usize::from(config.flags)));
    for (slot, glyph) in slots.iter().zip(glyphs) {
        layout[*slot] = glyph;
    }

    let mut text = String::with_capacity(cells + usize::from(config.height));
    for row in layout.chunks(width) {
        text.extend(row);
        text.push('\n');
    }
    Ok(text)
}
