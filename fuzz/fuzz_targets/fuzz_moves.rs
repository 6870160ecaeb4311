#![no_main]

use arbitrary::Arbitrary;
use flagwar::game::{Direction, GameState, MoveOutcome, PlayerId, attempt_move, check_invariants};
use flagwar::report::render_map;
use libfuzzer_sys::fuzz_target;

/// A single fuzzed move request.
#[derive(Arbitrary, Debug)]
struct FuzzMove {
    /// Index into the living players (wrapped).
    player: u8,
    /// Direction selector (wrapped to the four directions).
    direction: u8,
}

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MovesInput {
    /// Raw cells, wrapped onto the map alphabet.
    cells: Vec<u8>,
    /// Map width.
    width: u8,
    /// Move requests, applied in order.
    moves: Vec<FuzzMove>,
}

const ALPHABET: [char; 8] = ['.', '.', '.', 'R', 'P', 'S', 'F', '.'];

fuzz_target!(|input: MovesInput| {
    // Cap sizes to avoid excessive runtime
    let width = usize::from(input.width % 16).max(1);
    let cells: Vec<char> = input
        .cells
        .iter()
        .take(256)
        .map(|b| ALPHABET[usize::from(*b) % ALPHABET.len()])
        .collect();
    if cells.len() < width {
        return;
    }

    let layout: String = cells
        .chunks_exact(width)
        .map(|row| row.iter().collect::<String>() + "\n")
        .collect();

    let Ok(mut state) = GameState::parse(&layout) else {
        return;
    };
    assert_eq!(render_map(&state), layout, "round trip changed the layout");

    for m in input.moves.iter().take(200) {
        let living: Vec<PlayerId> = state.living_players().map(|(id, _)| id).collect();
        if living.is_empty() {
            break;
        }
        let mover = living[usize::from(m.player) % living.len()];
        let direction = Direction::ALL[usize::from(m.direction) % Direction::ALL.len()];
        let from = state.position_of(mover).unwrap();
        let before = state.clone();

        let outcome = attempt_move(&mut state, mover, from, direction).unwrap();
        if matches!(outcome, MoveOutcome::OffGrid | MoveOutcome::Stalemate { .. }) {
            assert_eq!(state, before);
        }

        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
    }
});
