//! End-to-end solving of generated and hand-written puzzles.

use pipeturn_core::{Position, Tile, TileGrid};
use pipeturn_solver::{PipeSolver, SolverError, testing::PuzzleFixture};
use proptest::prelude::*;

fn assert_solves(scrambled: &TileGrid, solved: &TileGrid) {
    assert!(solved.is_safe(), "unsafe result:\n{solved}");
    assert_eq!(solved.rows(), scrambled.rows());
    assert_eq!(solved.cols(), scrambled.cols());
    for pos in scrambled.positions() {
        if scrambled.is_border(pos) {
            assert_eq!(solved[pos], scrambled[pos], "border cell {pos} changed");
        } else {
            let tile = scrambled[pos];
            assert!(
                tile.distinct_rotations()
                    .iter()
                    .any(|r| tile.rotate(r) == solved[pos]),
                "{pos} is not a rotation of {tile}"
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scrambled_fixtures_solve(
        rows in 1usize..7,
        cols in 1usize..7,
        fill_ratio in 0.1f64..0.9,
        seed in any::<u64>(),
    ) {
        let fixture = PuzzleFixture::generate(rows, cols, fill_ratio, seed);
        let (solved, stats) = PipeSolver::new().solve(fixture.scrambled()).unwrap();
        assert_solves(fixture.scrambled(), &solved);
        prop_assert_eq!(stats.interior_cells(), rows * cols);
        prop_assert!(stats.resolved_by_propagation() <= stats.interior_cells());
    }

    #[test]
    fn parallel_clusters_solve(
        rows in 2usize..7,
        cols in 2usize..7,
        fill_ratio in 0.1f64..0.9,
        seed in any::<u64>(),
    ) {
        let fixture = PuzzleFixture::generate(rows, cols, fill_ratio, seed);
        let sequential = PipeSolver::new().solve(fixture.scrambled()).unwrap();
        let parallel = PipeSolver::new()
            .with_parallel_clusters(true)
            .solve(fixture.scrambled())
            .unwrap();
        assert_solves(fixture.scrambled(), &parallel.0);
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn solved_grids_solve_again(
        rows in 1usize..6,
        cols in 1usize..6,
        fill_ratio in 0.1f64..0.9,
        seed in any::<u64>(),
    ) {
        let fixture = PuzzleFixture::generate(rows, cols, fill_ratio, seed);
        let (solved, _) = PipeSolver::new().solve(fixture.scrambled()).unwrap();
        let (again, _) = PipeSolver::new().solve(&solved).unwrap();
        assert_solves(&solved, &again);
    }
}

#[test]
fn minimal_two_by_two() {
    let interior: TileGrid = "
        a6
        03
    "
    .parse()
    .unwrap();
    let grid = PuzzleFixture::frame(&interior);
    let (solved, _) = PipeSolver::new().solve(&grid).unwrap();
    assert_solves(&grid, &solved);
    assert_eq!(solved[Position::new(1, 1)], Tile::STRAIGHT_HORIZONTAL);
}

#[test]
fn cross_under_top_wall_is_unsolvable() {
    let interior: TileGrid = "
        f0
        00
    "
    .parse()
    .unwrap();
    let grid = PuzzleFixture::frame(&interior);
    assert_eq!(PipeSolver::new().solve(&grid), Err(SolverError::Unsolvable));
}

#[test]
fn fixture_sizes_from_the_demo() {
    for seed in 0..8 {
        let fixture = PuzzleFixture::generate(10, 10, 0.5, seed);
        let (solved, _) = PipeSolver::new()
            .with_parallel_clusters(true)
            .solve(fixture.scrambled())
            .unwrap();
        assert_solves(fixture.scrambled(), &solved);
    }
}
