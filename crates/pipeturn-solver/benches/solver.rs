//! Benchmarks for propagation and full solving.
//!
//! # Benchmarks
//!
//! - **`propagate`**: one propagation pass over a freshly built puzzle state.
//! - **`solve`**: the full pipeline, sequential and with parallel clusters.
//!
//! # Test Data
//!
//! Puzzles come from `PuzzleFixture` with fixed seeds, so every run measures
//! the same grids.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use pipeturn_solver::{PipeSolver, PuzzleState, propagation, testing::PuzzleFixture};

const SEEDS: [u64; 3] = [0x5eed_0001, 0x5eed_0002, 0x5eed_0003];
const SIZES: [(usize, usize); 3] = [(8, 8), (16, 16), (24, 32)];
const FILL_RATIO: f64 = 0.5;

fn fixtures() -> impl Iterator<Item = (String, PuzzleFixture)> {
    SIZES.into_iter().flat_map(|(rows, cols)| {
        SEEDS.into_iter().enumerate().map(move |(i, seed)| {
            (
                format!("{rows}x{cols}/seed_{i}"),
                PuzzleFixture::generate(rows, cols, FILL_RATIO, seed),
            )
        })
    })
}

fn bench_propagate(c: &mut Criterion) {
    for (param, fixture) in fixtures() {
        let state = PuzzleState::from_puzzle(fixture.scrambled().clone()).unwrap();
        c.bench_with_input(BenchmarkId::new("propagate", param), &state, |b, state| {
            b.iter_batched_ref(
                || hint::black_box(state.clone()),
                |state| hint::black_box(propagation::propagate(state)),
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_solve(c: &mut Criterion) {
    let solvers = [
        ("solve_sequential", PipeSolver::new()),
        ("solve_parallel", PipeSolver::new().with_parallel_clusters(true)),
    ];
    for (name, solver) in &solvers {
        for (param, fixture) in fixtures() {
            c.bench_with_input(
                BenchmarkId::new(*name, param),
                fixture.scrambled(),
                |b, grid| {
                    b.iter(|| hint::black_box(solver.solve(hint::black_box(grid))));
                },
            );
        }
    }
}

criterion_group!(benches, bench_propagate, bench_solve);
criterion_main!(benches);
