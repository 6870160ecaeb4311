//! Human-readable projections of a game.
//!
//! Nothing here mutates state; every function is a pure read over a
//! [`GameState`](crate::game::GameState) or a finished
//! [`SimResult`](crate::simulation::SimResult).

mod map;
mod text;

pub use map::{EMPTY_GLYPH, render_map};
pub use text::{format_result, format_scoreboard};
