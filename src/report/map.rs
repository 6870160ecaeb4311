//! Plain-text map renderer.

use crate::game::{Flag, GameState, Occupant};

/// Glyph used for an empty cell.
pub const EMPTY_GLYPH: char = '.';

/// Render the grid in the map layout alphabet.
///
/// Output format:
/// ```text
/// R..F
/// .S.P
/// ```
///
/// One line per row, each terminated by a newline. Captured flags are gone
/// from the grid and therefore render as empty cells; a dead player still
/// referenced by a cell renders as `X`. Rendering a freshly parsed map gives
/// back the original layout.
#[must_use]
pub fn render_map(state: &GameState) -> String {
    let width = usize::from(state.grid.width());
    let height = usize::from(state.grid.height());
    let mut output = String::with_capacity((width + 1) * height);

    for (i, (_, cell)) in state.grid.iter().enumerate() {
        output.push(glyph(state, cell));
        if (i + 1) % width == 0 {
            output.push('\n');
        }
    }

    output
}

fn glyph(state: &GameState, cell: Option<Occupant>) -> char {
    match cell {
        None => EMPTY_GLYPH,
        Some(Occupant::Player(id)) => state.player(id).map_or(EMPTY_GLYPH, |p| p.glyph()),
        Some(Occupant::Flag(id)) => match state.flag(id) {
            Some(flag) if !flag.captured => Flag::GLYPH,
            _ => EMPTY_GLYPH,
        },
    }
}
