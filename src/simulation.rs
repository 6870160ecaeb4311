//! Simulation driver for flag war games.
//!
//! Provides a pure function interface: `(map, config) -> SimResult`
//!
//! The driver handles:
//! - Deterministic map generation for seeded runs
//! - Per-team strategy selection
//! - Cycles over the roster in insertion order
//! - End-of-game detection and scoring

mod mapgen;

pub use mapgen::{MapGenConfig, MapGenError, generate_map};

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{GameError, GameResult};
use crate::game::{
    GameState, MoveOutcome, PlayerId, Position, ScoringWeights, Strategy, Team, assert_invariants,
    attempt_move, dead_player_count, team_scores, winning_team,
};

/// Strategy played by each team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamStrategies {
    /// Strategy of the Rock team.
    pub rock: Strategy,
    /// Strategy of the Paper team.
    pub paper: Strategy,
    /// Strategy of the Scissors team.
    pub scissors: Strategy,
}

impl Default for TeamStrategies {
    fn default() -> Self {
        Self {
            rock: Strategy::SeekFlag,
            paper: Strategy::SeekFlag,
            scissors: Strategy::Reactive,
        }
    }
}

impl TeamStrategies {
    /// Strategy assigned to `team`.
    #[must_use]
    pub const fn for_team(&self, team: Team) -> Strategy {
        match team {
            Team::Rock => self.rock,
            Team::Paper => self.paper,
            Team::Scissors => self.scissors,
        }
    }

    /// Same strategy for every team.
    #[must_use]
    pub const fn uniform(strategy: Strategy) -> Self {
        Self {
            rock: strategy,
            paper: strategy,
            scissors: strategy,
        }
    }
}

/// Configuration for a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Maximum cycles before the game ends (default: 200).
    pub max_cycles: u32,
    /// Weights used for player and team scores.
    pub scoring: ScoringWeights,
    /// Strategy played by each team.
    pub strategies: TeamStrategies,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: 200,
            scoring: ScoringWeights::default(),
            strategies: TeamStrategies::default(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// Error type for simulation operations.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The engine rejected the map or a move.
    #[error(transparent)]
    Game(#[from] GameError),
    /// A configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A configuration file is not valid JSON.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Map generation failed.
    #[error(transparent)]
    MapGen(#[from] MapGenError),
}

/// What happened during a single cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Cycle number, starting at 1.
    pub cycle: u32,
    /// Steps into empty cells.
    pub moves: u32,
    /// Flags captured.
    pub captures: u32,
    /// Fights won by the mover.
    pub kills: u32,
    /// Fights lost by the mover.
    pub losses: u32,
    /// Moves rejected at the grid edge.
    pub off_grid: u32,
    /// Same-team encounters.
    pub stalemates: u32,
    /// Living players that chose not to move.
    pub abstained: u32,
}

impl CycleReport {
    fn record(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::OffGrid => self.off_grid += 1,
            MoveOutcome::Moved { .. } => self.moves += 1,
            MoveOutcome::Captured { .. } => self.captures += 1,
            MoveOutcome::Won { .. } => self.kills += 1,
            MoveOutcome::Lost { .. } => self.losses += 1,
            MoveOutcome::Stalemate { .. } => self.stalemates += 1,
        }
    }
}

/// Final standing of a single player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    /// Roster index.
    pub id: usize,
    /// Display name.
    pub name: String,
    /// Team membership.
    pub team: Team,
    /// Whether the player survived.
    pub alive: bool,
    /// Flags captured.
    pub captured_flags: u32,
    /// Opponents defeated.
    pub killed_players: u32,
    /// Weighted score.
    pub score: u32,
    /// Final position (None if dead).
    pub position: Option<Position>,
}

/// Final result of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimResult {
    /// Cycles played.
    pub cycles_played: u32,
    /// The winning team (None on a tie or an empty roster).
    pub winner: Option<Team>,
    /// Aggregate score per team.
    pub team_scores: [(Team, u32); 3],
    /// Per-player outcome, in roster order.
    pub players: Vec<PlayerSummary>,
    /// Number of dead players.
    pub dead_players: usize,
    /// Number of captured flags.
    pub flags_captured: usize,
    /// Number of flags on the map at the start.
    pub flags_total: usize,
}

/// Run a complete game on a textual map.
///
/// This is the main entry point - a pure function from inputs to result.
///
/// # Determinism
///
/// Given the same map and config, this function always produces the same
/// `SimResult`.
///
/// # Errors
///
/// Returns an error if the map is malformed or the engine detects a broken
/// invariant.
pub fn run_simulation(layout: &str, config: &SimConfig) -> Result<SimResult, SimulationError> {
    let state = GameState::parse(layout)?;
    Ok(Simulation::new(state, *config).run()?)
}

/// Generate a map from `seed` and run a complete game on it.
///
/// # Errors
///
/// Returns an error if map generation fails or the engine detects a broken
/// invariant.
pub fn run_seeded(
    seed: u64,
    map: &MapGenConfig,
    config: &SimConfig,
) -> Result<SimResult, SimulationError> {
    let layout = generate_map(seed, map)?;
    run_simulation(&layout, config)
}

/// Drives a game cycle by cycle.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    config: SimConfig,
    cycle: u32,
}

impl Simulation {
    /// Create a simulation over an initial state.
    #[must_use]
    pub const fn new(state: GameState, config: SimConfig) -> Self {
        Self {
            state,
            config,
            cycle: 0,
        }
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Cycles completed so far.
    #[must_use]
    pub const fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Whether the game has ended.
    ///
    /// A game ends when every flag is captured, every player is dead, or the
    /// cycle limit is reached.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.all_flags_captured()
            || self.state.living_players().next().is_none()
            || self.cycle >= self.config.max_cycles
    }

    /// Give one player its decision and move.
    ///
    /// Returns `Ok(None)` when the player is dead or abstains.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is inconsistent.
    pub fn take_turn(&mut self, id: PlayerId) -> GameResult<Option<MoveOutcome>> {
        let Some(player) = self.state.player(id) else {
            return Err(GameError::InvariantViolation(format!(
                "player #{} is not in the roster",
                id.0
            )));
        };
        if !player.alive {
            return Ok(None);
        }

        let strategy = self.config.strategies.for_team(player.team);
        let Some(direction) = strategy.decide(&self.state, id)? else {
            return Ok(None);
        };

        if let Some(player) = self.state.player_mut(id) {
            player.heading = direction;
        }
        let from = self.state.position_of(id)?;
        attempt_move(&mut self.state, id, from, direction).map(Some)
    }

    /// Run one cycle: every living player, in roster order, decides and moves once.
    ///
    /// Players killed earlier in the cycle do not act.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is inconsistent.
    pub fn run_cycle(&mut self) -> GameResult<CycleReport> {
        self.cycle += 1;
        let mut report = CycleReport {
            cycle: self.cycle,
            ..CycleReport::default()
        };

        for id in self.state.player_ids() {
            let alive = self.state.player(id).is_some_and(|p| p.alive);
            if !alive {
                continue;
            }
            match self.take_turn(id)? {
                Some(outcome) => report.record(outcome),
                None => report.abstained += 1,
            }
        }

        assert_invariants(&self.state);
        Ok(report)
    }

    /// Run the game to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is inconsistent.
    pub fn run(mut self) -> GameResult<SimResult> {
        while !self.is_over() {
            self.run_cycle()?;
        }

        let result = self.result();
        debug!(
            "game over after {} cycles: winner {}, {}/{} flags captured, {} dead",
            result.cycles_played,
            result.winner.map_or_else(|| "none".to_string(), |t| t.to_string()),
            result.flags_captured,
            result.flags_total,
            result.dead_players
        );
        Ok(result)
    }

    /// Build the result for the current state.
    #[must_use]
    pub fn result(&self) -> SimResult {
        let weights = &self.config.scoring;
        let players = self
            .state
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| PlayerSummary {
                id: i,
                name: player.name.clone(),
                team: player.team,
                alive: player.alive,
                captured_flags: player.captured_flags,
                killed_players: player.killed_players,
                score: weights.score(player),
                position: player
                    .alive
                    .then(|| self.state.position_of(PlayerId(i)).ok())
                    .flatten(),
            })
            .collect();

        SimResult {
            cycles_played: self.cycle,
            winner: winning_team(&self.state.players, weights),
            team_scores: team_scores(&self.state.players, weights),
            players,
            dead_players: dead_player_count(&self.state.players),
            flags_captured: self.state.flags.iter().filter(|f| f.captured).count(),
            flags_total: self.state.flags.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_config_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.max_cycles, 200);
        assert_eq!(config.scoring, ScoringWeights { flag: 10, kill: 5 });
        assert_eq!(config.strategies.for_team(Team::Rock), Strategy::SeekFlag);
        assert_eq!(config.strategies.for_team(Team::Scissors), Strategy::Reactive);
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{"max_cycles": 7, "strategies": {"rock": "reactive"}}"#;
        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(config.max_cycles, 7);
        assert_eq!(config.strategies.rock, Strategy::Reactive);
        assert_eq!(config.strategies.paper, Strategy::SeekFlag);
        assert_eq!(config.scoring, ScoringWeights::default());
    }

    #[test]
    fn test_config_bad_json() {
        let err = SimConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_config_missing_file() {
        let err = SimConfig::load(Path::new("/nonexistent/flagwar.json")).unwrap_err();
        assert!(matches!(err, SimulationError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/flagwar.json"));
    }

    #[test]
    fn test_error_display() {
        let err = SimulationError::from(GameError::NoUncapturedFlags);
        assert_eq!(err.to_string(), GameError::NoUncapturedFlags.to_string());
        let err = SimulationError::from(MapGenError {
            reason: "bad".to_string(),
        });
        assert_eq!(err.to_string(), "Map generation error: bad");
    }

    #[test]
    fn test_single_player_captures_flag() {
        let result = run_simulation("R.F", &SimConfig::default()).unwrap();
        assert_eq!(result.cycles_played, 2);
        assert_eq!(result.flags_captured, 1);
        assert_eq!(result.winner, Some(Team::Rock));
        assert_eq!(result.players[0].score, 10);
        assert_eq!(result.players[0].position, Some(Position::new(2, 0)));
    }

    #[test]
    fn test_cycle_report_counts() {
        let state = GameState::parse("R.F\nP..").unwrap();
        let mut sim = Simulation::new(state, SimConfig::default());

        let report = sim.run_cycle().unwrap();
        assert_eq!(report.cycle, 1);
        // Both step right towards the flag
        assert_eq!(report.moves, 2);
        assert_eq!(report.captures, 0);

        let report = sim.run_cycle().unwrap();
        assert_eq!(report.captures, 1);
        assert!(sim.is_over());
    }

    #[test]
    fn test_killed_player_skips_turn() {
        // Rock attacks Scissors first; Scissors never acts
        let state = GameState::parse("RS.F").unwrap();
        let config = SimConfig {
            strategies: TeamStrategies::uniform(Strategy::Reactive),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(state, config);

        let report = sim.run_cycle().unwrap();
        assert_eq!(report.kills, 1);
        assert_eq!(report.abstained, 0);
        assert!(!sim.state().players[1].alive);
        assert_eq!(sim.state().players[0].killed_players, 1);
    }

    #[test]
    fn test_reactive_retreat_beats_player_behind() {
        // Scissors backs away from Rock into Paper and wins
        let state = GameState::parse("PSR.F").unwrap();
        let config = SimConfig {
            strategies: TeamStrategies::uniform(Strategy::Reactive),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(state, config);

        let outcome = sim.take_turn(PlayerId(1)).unwrap();
        assert_eq!(
            outcome,
            Some(MoveOutcome::Won {
                defender: PlayerId(0),
                to: Position::new(0, 0),
            })
        );
        assert!(!sim.state().players[0].alive);
        assert_eq!(sim.state().players[1].killed_players, 1);
        assert_eq!(sim.state().players[1].heading, Direction::Left);
        assert_eq!(sim.state().position_of(PlayerId(1)).unwrap(), Position::new(0, 0));
        assert_eq!(sim.state().grid.get(Position::new(1, 0)).unwrap(), None);
    }

    #[test]
    fn test_reactive_retreat_loses_to_player_behind() {
        // Scissors backs away from one Rock into another and dies
        let state = GameState::parse("RSR.F").unwrap();
        let config = SimConfig {
            strategies: TeamStrategies::uniform(Strategy::Reactive),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(state, config);

        let outcome = sim.take_turn(PlayerId(1)).unwrap();
        assert_eq!(
            outcome,
            Some(MoveOutcome::Lost {
                defender: PlayerId(0),
                defender_to: Position::new(1, 0),
            })
        );
        assert!(!sim.state().players[1].alive);
        assert_eq!(sim.state().players[0].killed_players, 1);
        assert_eq!(sim.state().position_of(PlayerId(0)).unwrap(), Position::new(1, 0));
        assert_eq!(sim.state().grid.get(Position::new(0, 0)).unwrap(), None);
    }

    #[test]
    fn test_heading_remembered() {
        let state = GameState::parse("F\n.\nR").unwrap();
        let mut sim = Simulation::new(state, SimConfig::default());
        sim.run_cycle().unwrap();
        assert_eq!(sim.state().players[0].heading, Direction::Up);
    }

    #[test]
    fn test_no_flags_ends_immediately() {
        let result = run_simulation("R.P", &SimConfig::default()).unwrap();
        assert_eq!(result.cycles_played, 0);
        assert_eq!(result.flags_total, 0);
    }

    #[test]
    fn test_max_cycles_limit() {
        let config = SimConfig {
            max_cycles: 3,
            ..SimConfig::default()
        };
        let result = run_simulation("R.......F", &config).unwrap();
        assert_eq!(result.cycles_played, 3);
        assert_eq!(result.flags_captured, 0);
        assert_eq!(result.winner, Some(Team::Rock));
    }

    #[test]
    fn test_zero_cycles() {
        let config = SimConfig {
            max_cycles: 0,
            ..SimConfig::default()
        };
        let result = run_simulation("R.F", &config).unwrap();
        assert_eq!(result.cycles_played, 0);
    }

    #[test]
    fn test_take_turn_dead_player() {
        let mut state = GameState::parse("R.F").unwrap();
        state.players[0].eliminate();
        let mut sim = Simulation::new(state, SimConfig::default());
        assert_eq!(sim.take_turn(PlayerId(0)).unwrap(), None);
        assert!(sim.take_turn(PlayerId(5)).is_err());
    }

    #[test]
    fn test_run_deterministic() {
        let map = MapGenConfig::default();
        let config = SimConfig::default();
        let a = run_seeded(1234, &map, &config).unwrap();
        let b = run_seeded(1234, &map, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_seeded_bad_map() {
        let map = MapGenConfig {
            width: 1,
            height: 1,
            ..MapGenConfig::default()
        };
        let err = run_seeded(1, &map, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimulationError::MapGen(_)));
    }

    #[test]
    fn test_malformed_map() {
        let err = run_simulation("R.\nF", &SimConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Game(GameError::MalformedMap { line: 2, .. })
        ));
    }
}
