//! Benchmarks for cycles and complete games.
//!
//! This benchmarks the simulation loop - strategy decisions plus move resolution.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use flagwar::game::GameState;
use flagwar::simulation::{MapGenConfig, SimConfig, Simulation, generate_map, run_seeded};

fn large_map() -> MapGenConfig {
    MapGenConfig {
        width: 64,
        height: 64,
        players_per_team: 20,
        flags: 30,
    }
}

fn bench_single_game(c: &mut Criterion) {
    let map = MapGenConfig::default();
    let config = SimConfig::default();

    c.bench_function("single_game_16x12", |b| {
        b.iter(|| {
            let result = run_seeded(black_box(42), black_box(&map), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_single_game_large(c: &mut Criterion) {
    let map = large_map();
    let config = SimConfig::default();

    c.bench_function("single_game_64x64", |b| {
        b.iter(|| {
            let result = run_seeded(black_box(42), black_box(&map), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_first_cycle(c: &mut Criterion) {
    // One cycle from a fresh state isolates decision and resolver cost
    let layout = generate_map(7, &large_map()).unwrap();
    let state = GameState::parse(&layout).unwrap();
    let config = SimConfig::default();

    c.bench_function("first_cycle_64x64", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(state.clone(), config);
            black_box(sim.run_cycle())
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // Benchmark running 10 games sequentially (without parallel overhead)
    let map = MapGenConfig::default();
    let config = SimConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(run_seeded(seed, &map, &config).ok());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_single_game_large,
    bench_first_cycle,
    bench_game_batch
);
criterion_main!(benches);
