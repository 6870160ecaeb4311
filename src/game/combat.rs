//! Combat adjudication.
//!
//! The rock-paper-scissors cycle lives in a single table keyed by
//! `(own team, other team)`. Every off-diagonal entry has its mirror as the
//! opposite outcome and the diagonal is always a draw.

use serde::Serialize;

use crate::game::Team;
use Outcome::{Draw, Loss, Win};

/// Result of a fight, from the perspective of the team asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// The asking side wins.
    Win,
    /// The asking side loses.
    Loss,
    /// Nobody wins (same team).
    Draw,
}

impl Outcome {
    /// The same fight seen from the other side.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Outcome table indexed by `[own.index()][other.index()]`.
///
/// Rows and columns are Rock, Paper, Scissors.
const OUTCOMES: [[Outcome; 3]; 3] = [
    //  Rock  Paper Scissors
    [Draw, Loss, Win],  // Rock
    [Win, Draw, Loss],  // Paper
    [Loss, Win, Draw],  // Scissors
];

impl Team {
    /// Adjudicate a fight between this team and `other`.
    #[must_use]
    pub const fn resolve(self, other: Team) -> Outcome {
        OUTCOMES[self.index()][other.index()]
    }
}
