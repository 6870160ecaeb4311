//! Scores and rankings derived from the player roster.
//!
//! Everything here is a pure read over the roster.

use serde::{Deserialize, Serialize};

use crate::game::{Player, Team};

/// Scoring weights for player scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points per captured flag (default: 10).
    pub flag: u32,
    /// Points per defeated opponent (default: 5).
    pub kill: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { flag: 10, kill: 5 }
    }
}

impl ScoringWeights {
    /// Score of a single player.
    #[must_use]
    pub fn score(&self, player: &Player) -> u32 {
        player
            .captured_flags
            .saturating_mul(self.flag)
            .saturating_add(player.killed_players.saturating_mul(self.kill))
    }
}

/// All players sorted by score, highest first.
///
/// The sort is stable, so equal scores keep roster order.
#[must_use]
pub fn ranked_players<'a>(players: &'a [Player], weights: &ScoringWeights) -> Vec<&'a Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by_key(|p| std::cmp::Reverse(weights.score(p)));
    ranked
}

/// Players of one team sorted by score, highest first.
#[must_use]
pub fn ranked_players_in_team<'a>(
    players: &'a [Player],
    team: Team,
    weights: &ScoringWeights,
) -> Vec<&'a Player> {
    ranked_players(players, weights)
        .into_iter()
        .filter(|p| p.team == team)
        .collect()
}

/// Sum of the scores of one team's players, dead ones included.
#[must_use]
pub fn team_score(players: &[Player], team: Team, weights: &ScoringWeights) -> u32 {
    players
        .iter()
        .filter(|p| p.team == team)
        .map(|p| weights.score(p))
        .fold(0, u32::saturating_add)
}

/// Aggregate score of every team, in [`Team::ALL`] order.
#[must_use]
pub fn team_scores(players: &[Player], weights: &ScoringWeights) -> [(Team, u32); 3] {
    Team::ALL.map(|team| (team, team_score(players, team, weights)))
}

/// The team with the highest aggregate score among teams that have players.
///
/// Returns `None` for an empty roster or when the top score is shared.
#[must_use]
pub fn winning_team(players: &[Player], weights: &ScoringWeights) -> Option<Team> {
    let mut contenders: Vec<(Team, u32)> = team_scores(players, weights)
        .into_iter()
        .filter(|(team, _)| players.iter().any(|p| p.team == *team))
        .collect();
    contenders.sort_by_key(|(_, score)| std::cmp::Reverse(*score));

    match contenders.as_slice() {
        [] => None,
        [(team, _)] => Some(*team),
        [(team, best), (_, second), ..] => (best > second).then_some(*team),
    }
}

/// Number of dead players.
#[must_use]
pub fn dead_player_count(players: &[Player]) -> usize {
    players.iter().filter(|p| !p.alive).count()
}
