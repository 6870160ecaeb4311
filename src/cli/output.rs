//! Output formatting utilities for CLI.

// Allow format! with push_str and float stats for readability
#![allow(
    clippy::format_push_string,
    clippy::cast_precision_loss
)]

use flagwar::game::Team;
use flagwar::simulation::{CycleReport, MapGenConfig, SimResult};
use serde::Serialize;

/// JSON-serializable result of the `run` command.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunResult<'a> {
    /// Map file name.
    pub(super) map: String,
    /// Maximum cycles allowed.
    pub(super) max_cycles: u32,
    /// Full simulation result.
    pub(super) result: &'a SimResult,
    /// Final map in layout form.
    pub(super) final_map: String,
}

/// Format a single cycle report as one line.
pub(super) fn format_cycle(report: &CycleReport) -> String {
    format!(
        "Cycle {:>4}: {} moved, {} captured, {} won, {} lost, {} blocked, {} idle",
        report.cycle,
        report.moves,
        report.captures,
        report.kills,
        report.losses,
        report.off_grid + report.stalemates,
        report.abstained
    )
}

/// Aggregated statistics over many games.
#[derive(Debug, Clone, Default)]
pub(super) struct BatchStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that failed to run.
    pub(super) failures: u64,
    /// Win count per team, in `Team::ALL` order.
    pub(super) wins: [u64; 3],
    /// Games without a single winner.
    pub(super) ties: u64,
    /// Total score per team.
    total_scores: [u64; 3],
    /// Total cycles across all games.
    total_cycles: u64,
    /// Total flags captured across all games.
    total_captures: u64,
    /// Total flags placed across all games.
    total_flags: u64,
    /// Total players killed across all games.
    total_dead: u64,
    /// Games ending with every flag captured.
    flags_exhausted: u64,
}

impl BatchStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &SimResult) {
        self.games_played += 1;
        self.total_cycles += u64::from(result.cycles_played);
        self.total_captures += result.flags_captured as u64;
        self.total_flags += result.flags_total as u64;
        self.total_dead += result.dead_players as u64;
        if result.flags_total > 0 && result.flags_captured == result.flags_total {
            self.flags_exhausted += 1;
        }

        match result.winner {
            Some(team) => self.wins[team.index()] += 1,
            None => self.ties += 1,
        }
        for (team, score) in result.team_scores {
            self.total_scores[team.index()] += u64::from(score);
        }
    }

    /// Record a game that failed to run.
    pub(super) fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Merge stats accumulated on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failures += other.failures;
        self.ties += other.ties;
        for i in 0..3 {
            self.wins[i] += other.wins[i];
            self.total_scores[i] += other.total_scores[i];
        }
        self.total_cycles += other.total_cycles;
        self.total_captures += other.total_captures;
        self.total_flags += other.total_flags;
        self.total_dead += other.total_dead;
        self.flags_exhausted += other.flags_exhausted;
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }

    /// Win rate for a team (0.0-1.0).
    pub(super) fn win_rate(&self, team: Team) -> f64 {
        self.per_game(self.wins[team.index()])
    }

    /// Average score for a team.
    pub(super) fn avg_score(&self, team: Team) -> f64 {
        self.per_game(self.total_scores[team.index()])
    }

    /// Average game length in cycles.
    pub(super) fn avg_cycles(&self) -> f64 {
        self.per_game(self.total_cycles)
    }

    /// Average deaths per game.
    pub(super) fn avg_dead(&self) -> f64 {
        self.per_game(self.total_dead)
    }

    /// Share of placed flags that were captured (0.0-1.0).
    pub(super) fn capture_rate(&self) -> f64 {
        if self.total_flags == 0 {
            return 0.0;
        }
        self.total_captures as f64 / self.total_flags as f64
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Total games played.
    games_played: u64,
    /// Games that failed to run.
    failures: u64,
    /// Map shape used for every game.
    map: MapGenConfig,
    /// Per-team statistics.
    teams: Vec<JsonBatchTeam>,
    /// Number of ties.
    ties: u64,
    /// Average game length in cycles.
    avg_cycles: f64,
    /// Average deaths per game.
    avg_dead: f64,
    /// Share of flags captured.
    capture_rate: f64,
    /// Games ending with every flag captured.
    flags_exhausted: u64,
}

/// JSON-serializable per-team batch stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchTeam {
    /// Team name.
    team: Team,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average score.
    avg_score: f64,
}

impl JsonBatchResult {
    /// Create from stats and the map shape.
    pub(super) fn from_stats(stats: &BatchStats, map: MapGenConfig) -> Self {
        let teams = Team::ALL
            .iter()
            .map(|&team| JsonBatchTeam {
                team,
                wins: stats.wins[team.index()],
                win_rate: stats.win_rate(team),
                avg_score: stats.avg_score(team),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            failures: stats.failures,
            map,
            teams,
            ties: stats.ties,
            avg_cycles: stats.avg_cycles(),
            avg_dead: stats.avg_dead(),
            capture_rate: stats.capture_rate(),
            flags_exhausted: stats.flags_exhausted,
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, map: &MapGenConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Batch Results ({} games, {}x{} map, {} players/team, {} flags)\n",
        stats.games_played, map.width, map.height, map.players_per_team, map.flags
    ));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for team in Team::ALL {
        output.push_str(&format!(
            "  {:<9} {:.1}% ({} wins)\n",
            team.to_string(),
            stats.win_rate(team) * 100.0,
            stats.wins[team.index()]
        ));
    }
    output.push_str(&format!(
        "  Ties:     {} ({:.1}%)\n\n",
        stats.ties,
        stats.per_game(stats.ties) * 100.0
    ));

    output.push_str("Average Scores:\n");
    for team in Team::ALL {
        output.push_str(&format!("  {:<9} {:.1}\n", team.to_string(), stats.avg_score(team)));
    }

    output.push_str(&format!("\nAverage Game Length: {:.1} cycles\n", stats.avg_cycles()));
    output.push_str(&format!("Average Deaths: {:.1}\n", stats.avg_dead()));
    output.push_str(&format!(
        "Flags Captured: {:.1}% ({} games cleared every flag)\n",
        stats.capture_rate() * 100.0,
        stats.flags_exhausted
    ));
    if stats.failures > 0 {
        output.push_str(&format!("Failed Games: {}\n", stats.failures));
    }

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("team,wins,win_rate,avg_score\n");

    // Data rows
    for team in Team::ALL {
        output.push_str(&format!(
            "{},{},{:.4},{:.2}\n",
            team,
            stats.wins[team.index()],
            stats.win_rate(team),
            stats.avg_score(team)
        ));
    }
    output.push_str(&format!("tie,{},{:.4},\n", stats.ties, stats.per_game(stats.ties)));

    output
}
