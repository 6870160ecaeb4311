//! Run command implementation.

use super::output::{JsonRunResult, format_cycle};
use super::{CliError, OutputFormat, load_config, read_map};
use flagwar::GameState;
use flagwar::report::{format_result, format_scoreboard, render_map};
use flagwar::simulation::Simulation;
use log::info;
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the map or config cannot be loaded or the game fails.
pub(crate) fn execute(
    map: &Path,
    cycles: Option<u32>,
    config: Option<&Path>,
    format: OutputFormat,
    quiet: bool,
    show_map: bool,
) -> Result<(), CliError> {
    let layout = read_map(map)?;
    let state = GameState::parse(&layout).map_err(|source| CliError::Map {
        path: map.to_path_buf(),
        source,
    })?;
    let config = load_config(config, cycles)?;

    info!(
        "loaded {} ({}x{}, {} players, {} flags)",
        map.display(),
        state.grid.width(),
        state.grid.height(),
        state.players.len(),
        state.flags.len()
    );

    let text = format == OutputFormat::Text;
    let mut sim = Simulation::new(state, config);

    if text && !quiet && show_map {
        print!("{}", render_map(sim.state()));
        println!();
    }

    while !sim.is_over() {
        let report = sim.run_cycle()?;
        if text && !quiet {
            println!("{}", format_cycle(&report));
            if show_map {
                print!("{}", render_map(sim.state()));
                println!();
            }
        }
    }

    let result = sim.result();

    match format {
        OutputFormat::Text => {
            if !quiet {
                println!();
            }
            if !show_map || quiet {
                print!("{}", render_map(sim.state()));
                println!();
            }
            print!("{}", format_scoreboard(sim.state(), &config.scoring));
            println!();
            print!("{}", format_result(&result));
        }
        OutputFormat::Json => {
            let json_result = JsonRunResult {
                map: map
                    .file_name()
                    .map_or_else(|| "unknown".to_string(), |n| n.to_string_lossy().to_string()),
                max_cycles: config.max_cycles,
                result: &result,
                final_map: render_map(sim.state()),
            };
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
    }

    Ok(())
}
