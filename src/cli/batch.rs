//! Batch command implementation.

use super::output::{BatchStats, JsonBatchResult, format_batch_csv, format_batch_text};
use super::{BatchFormat, CliError, load_config};
use flagwar::simulation::{MapGenConfig, generate_map, run_seeded};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the map shape is invalid.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    map: MapGenConfig,
    cycles: Option<u32>,
    config: Option<&Path>,
    threads: Option<usize>,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = load_config(config, cycles)?;

    // Reject impossible shapes up front instead of failing every game
    generate_map(0, &map).map_err(flagwar::SimulationError::from)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
    {
        warn!("could not resize thread pool: {e}");
    }

    // Base seed
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(42, |d| d.as_secs() ^ u64::from(d.subsec_nanos()))
    });

    info!("running {games} games from seed {base_seed}");

    // Progress bar
    let pb = progress.then(|| {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb
    });

    let start = Instant::now();

    // Each thread accumulates into its own BatchStats, then we merge at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);

            match run_seeded(game_seed, &map, &config) {
                Ok(result) => local_stats.add_result(&result),
                Err(e) => {
                    warn!("game with seed {game_seed} failed: {e}");
                    local_stats.add_failure();
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }

            local_stats
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    info!(
        "finished {} games in {:.2}s ({} failed)",
        stats.games_played,
        duration.as_secs_f64(),
        stats.failures
    );

    // Calculate games per second
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    // Output based on format
    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats, &map));
            println!();
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        BatchFormat::Json => {
            let json_result = JsonBatchResult::from_stats(&stats, map);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
