//! Map validation command implementation.

use super::{CliError, read_map};
use flagwar::game::{Team, check_invariants};
use flagwar::report::render_map;
use flagwar::GameState;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the map file cannot be read or is not a valid layout.
pub(crate) fn execute(map: &Path) -> Result<(), CliError> {
    let layout = read_map(map)?;

    println!("Validating: {}", map.display());
    println!();

    let parsed = GameState::parse(&layout);
    print_check("Rectangular layout", parsed.is_ok());
    let state = parsed.map_err(|source| CliError::Map {
        path: map.to_path_buf(),
        source,
    })?;

    let has_players = !state.players.is_empty();
    print_check("At least one player", has_players);
    let has_flags = !state.flags.is_empty();
    print_check("At least one flag", has_flags);

    let violations = check_invariants(&state);
    print_check("Consistent state", violations.is_empty());
    if let Some(violation) = violations.first() {
        return Err(CliError::Invalid(violation.to_string()));
    }

    println!();
    println!("Summary:");
    println!("  Size:         {}x{}", state.grid.width(), state.grid.height());
    for team in Team::ALL {
        let count = state.players.iter().filter(|p| p.team == team).count();
        println!("  {:<13} {count}", format!("{team}:"));
    }
    println!("  Flags:        {}", state.flags.len());
    println!();
    print!("{}", render_map(&state));

    if !has_players || !has_flags {
        println!();
        println!("Warning: a game on this map ends immediately.");
        return Ok(());
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

/// Print a validation check result.
fn print_check(name: &str, passed: bool) {
    let status = if passed { "OK" } else { "FAIL" };
    println!("  [{status}] {name}");
}
