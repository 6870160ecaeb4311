//! End-to-end scenarios for the move resolver and the simulation driver.
//!
//! Run with: cargo test scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write;

use flagwar::game::{
    Direction, GameState, MoveOutcome, Occupant, PlayerId, Position, Strategy, Team, attempt_move,
    check_invariants,
};
use flagwar::report::{format_scoreboard, render_map};
use flagwar::simulation::{SimConfig, Simulation, TeamStrategies, run_simulation};
use flagwar::GameError;

fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

#[test]
fn test_scenario_rock_walks_and_defeats_scissors() {
    let mut state = GameState::parse("R.S").unwrap();
    let rock = PlayerId(0);
    let scissors = PlayerId(1);

    let outcome = attempt_move(&mut state, rock, pos(0, 0), Direction::Right).unwrap();
    assert_eq!(outcome, MoveOutcome::Moved { to: pos(1, 0) });
    assert_eq!(state.grid.get(pos(1, 0)).unwrap(), Some(Occupant::Player(rock)));
    assert_eq!(state.grid.get(pos(0, 0)).unwrap(), None);

    let outcome = attempt_move(&mut state, rock, pos(1, 0), Direction::Right).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Won {
            defender: scissors,
            to: pos(2, 0)
        }
    );
    assert!(!state.players[1].alive);
    assert_eq!(state.position_of(scissors), Err(GameError::NotFound(Occupant::Player(scissors))));
    assert_eq!(state.position_of(rock).unwrap(), pos(2, 0));
    assert_eq!(state.players[0].killed_players, 1);
    assert!(check_invariants(&state).is_empty());
}

#[test]
fn test_scenario_rock_walks_into_stronger_paper() {
    let mut state = GameState::parse("R.P").unwrap();
    attempt_move(&mut state, PlayerId(0), pos(0, 0), Direction::Right).unwrap();
    let outcome = attempt_move(&mut state, PlayerId(0), pos(1, 0), Direction::Right).unwrap();

    // The defender advances into the loser's cell
    assert_eq!(
        outcome,
        MoveOutcome::Lost {
            defender: PlayerId(1),
            defender_to: pos(1, 0)
        }
    );
    assert!(!state.players[0].alive);
    assert_eq!(state.players[1].killed_players, 1);
    assert_eq!(render_map(&state), ".P.\n");
}

#[test]
fn test_scenario_flag_capture() {
    let mut state = GameState::parse("RF").unwrap();
    let outcome = attempt_move(&mut state, PlayerId(0), pos(0, 0), Direction::Right).unwrap();

    assert!(matches!(outcome, MoveOutcome::Captured { to, .. } if to == pos(1, 0)));
    assert_eq!(state.players[0].captured_flags, 1);
    assert_eq!(state.position_of(PlayerId(0)).unwrap(), pos(1, 0));
    assert!(state.flags[0].captured);
    assert!(state.grid.occupied().all(|(_, o)| !matches!(o, Occupant::Flag(_))));
}

#[test]
fn test_captured_flag_cannot_be_recaptured() {
    let mut state = GameState::parse("RF.").unwrap();
    attempt_move(&mut state, PlayerId(0), pos(0, 0), Direction::Right).unwrap();
    attempt_move(&mut state, PlayerId(0), pos(1, 0), Direction::Right).unwrap();
    let outcome = attempt_move(&mut state, PlayerId(0), pos(2, 0), Direction::Left).unwrap();

    assert_eq!(outcome, MoveOutcome::Moved { to: pos(1, 0) });
    assert_eq!(state.players[0].captured_flags, 1);
}

#[test]
fn test_scenario_no_uncaptured_flags() {
    let state = GameState::parse("R..\n.P.").unwrap();
    assert_eq!(state.nearest_flag_position(PlayerId(0)), Err(GameError::NoUncapturedFlags));

    let mut state = GameState::parse("RF").unwrap();
    attempt_move(&mut state, PlayerId(0), pos(0, 0), Direction::Right).unwrap();
    assert_eq!(state.nearest_flag_position(PlayerId(0)), Err(GameError::NoUncapturedFlags));
}

#[test]
fn test_scenario_off_grid_is_noop() {
    let mut state = GameState::parse("R.\n.F").unwrap();
    let before = state.clone();

    for direction in [Direction::Up, Direction::Left] {
        let outcome = attempt_move(&mut state, PlayerId(0), pos(0, 0), direction).unwrap();
        assert_eq!(outcome, MoveOutcome::OffGrid);
    }
    assert_eq!(state, before);
}

#[test]
fn test_same_team_is_noop() {
    let mut state = GameState::parse("SS").unwrap();
    let before = state.clone();
    let outcome = attempt_move(&mut state, PlayerId(0), pos(0, 0), Direction::Right).unwrap();
    assert_eq!(outcome, MoveOutcome::Stalemate { other: PlayerId(1) });
    assert_eq!(state, before);
}

#[test]
fn test_origin_is_top_left() {
    let state = GameState::parse("P..\n..F\n.R.").unwrap();
    assert_eq!(state.position_of(PlayerId(0)).unwrap(), pos(0, 0));
    assert_eq!(state.position_of(PlayerId(1)).unwrap(), pos(1, 2));
    assert_eq!(state.grid.get(pos(2, 1)).unwrap(), Some(Occupant::Flag(flagwar::FlagId(0))));
    assert_eq!(pos(1, 1).step(Direction::Up), pos(1, 0));
}

#[test]
fn test_round_trip() {
    let layout = "R...F\n.P.S.\nF.R..\n";
    let state = GameState::parse(layout).unwrap();
    assert_eq!(render_map(&state), layout);

    let reparsed = GameState::parse(&render_map(&state)).unwrap();
    assert_eq!(reparsed, state);
}

#[test]
fn test_malformed_maps() {
    assert!(matches!(GameState::parse(""), Err(GameError::MalformedMap { line: 0, .. })));
    assert!(matches!(
        GameState::parse("R..\nF.\n..."),
        Err(GameError::MalformedMap { line: 2, .. })
    ));
}

#[test]
fn test_full_game_three_teams() {
    let layout = "\
R.......F
.........
....S....
.........
F.......P
";
    let result = run_simulation(layout, &SimConfig::default()).unwrap();

    assert!(result.cycles_played > 0);
    assert!(result.cycles_played <= 200);
    let captures: u32 = result.players.iter().map(|p| p.captured_flags).sum();
    assert_eq!(captures as usize, result.flags_captured);
    let kills: u32 = result.players.iter().map(|p| p.killed_players).sum();
    assert_eq!(kills as usize, result.dead_players);
}

#[test]
fn test_game_ends_when_flags_run_out() {
    let result = run_simulation("R.F.F", &SimConfig::default()).unwrap();
    assert_eq!(result.flags_captured, 2);
    assert_eq!(result.cycles_played, 4);
    assert_eq!(result.players[0].score, 20);
}

#[test]
fn test_simulation_step_by_step() {
    let state = GameState::parse("S..\nP.F").unwrap();
    let config = SimConfig {
        strategies: TeamStrategies::uniform(Strategy::SeekFlag),
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(state, config);

    while !sim.is_over() {
        sim.run_cycle().unwrap();
        assert!(check_invariants(sim.state()).is_empty());
    }
    assert!(sim.state().all_flags_captured());

    let board = format_scoreboard(sim.state(), &config.scoring);
    assert!(board.lines().next().unwrap().ends_with("Points: 10"));
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "max_cycles": 50,
            "scoring": {{ "flag": 3, "kill": 1 }},
            "strategies": {{ "rock": "reactive", "paper": "reactive", "scissors": "seek_flag" }}
        }}"#
    )
    .unwrap();

    let config = SimConfig::load(file.path()).unwrap();
    assert_eq!(config.max_cycles, 50);
    assert_eq!(config.scoring.flag, 3);
    assert_eq!(config.strategies.for_team(Team::Scissors), Strategy::SeekFlag);
    assert_eq!(config.strategies.for_team(Team::Rock), Strategy::Reactive);

    let result = run_simulation("R.F", &config).unwrap();
    assert_eq!(result.players[0].score, 3);
}

#[test]
fn test_config_file_rejects_bad_strategy() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "strategies": {{ "rock": "teleport" }} }}"#).unwrap();
    assert!(SimConfig::load(file.path()).is_err());
}
