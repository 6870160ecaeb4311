//! Scoreboard and result summaries as plain text.

// Allow format! with push_str for readability; the allocation overhead is
// negligible for text rendering
#![allow(clippy::format_push_string)]

use crate::game::{GameState, ScoringWeights, ranked_players_in_team, team_scores};
use crate::simulation::SimResult;

/// Render the scoreboard, one line per player.
///
/// Output format:
/// ```text
/// Team Scissors Cora Points: 25 DEAD
/// Team Rock Ada Points: 10
/// Team Rock Dmitri Points: 10
/// Team Paper Basil Points: 5
/// ```
///
/// Teams are ordered by aggregate score (highest first, ties in team order),
/// players by score within their team.
#[must_use]
pub fn format_scoreboard(state: &GameState, weights: &ScoringWeights) -> String {
    let mut teams = team_scores(&state.players, weights);
    teams.sort_by_key(|(_, score)| std::cmp::Reverse(*score));

    let mut output = String::new();
    for (team, _) in teams {
        for player in ranked_players_in_team(&state.players, team, weights) {
            output.push_str(&format!(
                "Team {team} {} Points: {}",
                player.name,
                weights.score(player)
            ));
            if !player.alive {
                output.push_str(" DEAD");
            }
            output.push('\n');
        }
    }
    output
}

/// Render a finished game summary.
///
/// Output format:
/// ```text
/// Cycles: 12
/// Flags captured: 3/4
/// Dead players: 2
/// Team scores: Rock 25, Paper 10, Scissors 5
/// Winner: Rock
/// ```
#[must_use]
pub fn format_result(result: &SimResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("Cycles: {}\n", result.cycles_played));
    output.push_str(&format!(
        "Flags captured: {}/{}\n",
        result.flags_captured, result.flags_total
    ));
    output.push_str(&format!("Dead players: {}\n", result.dead_players));

    let scores: Vec<String> = result
        .team_scores
        .iter()
        .map(|(team, score)| format!("{team} {score}"))
        .collect();
    output.push_str(&format!("Team scores: {}\n", scores.join(", ")));

    match result.winner {
        Some(team) => output.push_str(&format!("Winner: {team}\n")),
        None => output.push_str("Winner: none (tie)\n"),
    }
    output
}
