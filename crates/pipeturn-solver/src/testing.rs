//! Puzzle fixtures for tests, benchmarks and demos.
//!
//! [`PuzzleFixture`] builds a random solvable puzzle from a seed, so that a
//! failing case can be reproduced from the seed alone.
//!
//! # Example
//!
//! ```
//! use pipeturn_solver::{PipeSolver, testing::PuzzleFixture};
//!
//! let fixture = PuzzleFixture::generate(4, 5, 0.5, 42);
//! assert!(fixture.solution().is_safe());
//!
//! let (solved, _stats) = PipeSolver::new().solve(fixture.scrambled())?;
//! assert!(solved.is_safe());
//! # Ok::<(), pipeturn_solver::SolverError>(())
//! ```

use pipeturn_core::{Position, Rotation, Tile, TileGrid};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

/// A solved puzzle and a scrambled copy of it.
///
/// Both grids have the standard ring: walls everywhere except the entrance
/// at the top of the left border and the exit at the bottom of the right
/// border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleFixture {
    seed: u64,
    solution: TileGrid,
    scrambled: TileGrid,
}

impl PuzzleFixture {
    /// Generates a `rows` x `cols` puzzle (border excluded).
    ///
    /// Every edge between two interior cells is opened with probability
    /// `fill_ratio`. The interior cells next to the entrance and the exit
    /// always open towards them. Each interior tile of the scrambled grid is
    /// then turned by a random rotation.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero, or if `fill_ratio` is not within
    /// `0.0..=1.0`.
    #[must_use]
    pub fn generate(rows: usize, cols: usize, fill_ratio: f64, seed: u64) -> Self {
        assert!(rows > 0 && cols > 0, "puzzle must have interior cells");
        assert!(
            (0.0..=1.0).contains(&fill_ratio),
            "fill ratio must be between 0 and 1, got {fill_ratio}"
        );
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut solution = TileGrid::filled(rows + 2, cols + 2, Tile::WALL);
        solution[Position::new(1, 0)] = Tile::ENTRANCE;
        solution[Position::new(1, 1)] |= Tile::LEFT;
        solution[Position::new(rows, cols + 1)] = Tile::EXIT;
        solution[Position::new(rows, cols)] |= Tile::RIGHT;

        for row in 1..=rows {
            for col in 1..=cols {
                let pos = Position::new(row, col);
                if col < cols && rng.random_bool(fill_ratio) {
                    solution[pos] |= Tile::RIGHT;
                    solution[Position::new(row, col + 1)] |= Tile::LEFT;
                }
                if row < rows && rng.random_bool(fill_ratio) {
                    solution[pos] |= Tile::BOTTOM;
                    solution[Position::new(row + 1, col)] |= Tile::TOP;
                }
            }
        }

        let mut scrambled = solution.clone();
        for pos in solution.positions() {
            if !solution.is_border(pos) {
                let rotation = Rotation::from_quarter_turns(rng.random_range(0..4));
                scrambled[pos] = solution[pos].rotate(rotation);
            }
        }

        Self {
            seed,
            solution,
            scrambled,
        }
    }

    /// Wraps a hand-written interior in the standard ring.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeturn_core::TileGrid;
    /// use pipeturn_solver::testing::PuzzleFixture;
    ///
    /// let interior: TileGrid = "5".parse()?;
    /// let framed = PuzzleFixture::frame(&interior);
    /// assert_eq!(framed.to_string(), "000\n451\n000");
    /// # Ok::<(), pipeturn_core::GridParseError>(())
    /// ```
    #[must_use]
    pub fn frame(interior: &TileGrid) -> TileGrid {
        let (rows, cols) = (interior.rows(), interior.cols());
        let mut grid = TileGrid::filled(rows + 2, cols + 2, Tile::WALL);
        for pos in interior.positions() {
            grid[Position::new(pos.row() + 1, pos.col() + 1)] = interior[pos];
        }
        grid[Position::new(1, 0)] = Tile::ENTRANCE;
        grid[Position::new(rows, cols + 1)] = Tile::EXIT;
        grid
    }

    /// Returns the seed the fixture was generated from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the generated solution.
    #[must_use]
    pub fn solution(&self) -> &TileGrid {
        &self.solution
    }

    /// Returns the puzzle to solve.
    #[must_use]
    pub fn scrambled(&self) -> &TileGrid {
        &self.scrambled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_is_safe() {
        for seed in 0..20 {
            let fixture = PuzzleFixture::generate(5, 7, 0.6, seed);
            assert!(fixture.solution().is_safe(), "seed {seed}");
        }
    }

    #[test]
    fn test_scrambled_keeps_ring_and_shapes() {
        let fixture = PuzzleFixture::generate(4, 4, 0.5, 7);
        let (solution, scrambled) = (fixture.solution(), fixture.scrambled());
        assert_eq!(scrambled.rows(), 6);
        assert_eq!(scrambled.cols(), 6);
        for pos in solution.positions() {
            if solution.is_border(pos) {
                assert_eq!(scrambled[pos], solution[pos]);
            } else {
                assert!(
                    Rotation::ALL
                        .into_iter()
                        .any(|r| scrambled[pos].rotate(r) == solution[pos])
                );
            }
        }
        assert_eq!(scrambled[Position::new(1, 0)], Tile::ENTRANCE);
        assert_eq!(scrambled[Position::new(4, 5)], Tile::EXIT);
    }

    #[test]
    fn test_same_seed_same_fixture() {
        assert_eq!(
            PuzzleFixture::generate(3, 3, 0.5, 99),
            PuzzleFixture::generate(3, 3, 0.5, 99)
        );
        assert_eq!(PuzzleFixture::generate(3, 3, 0.5, 99).seed(), 99);
    }

    #[test]
    fn test_empty_fill_is_bare_path_ends() {
        let fixture = PuzzleFixture::generate(2, 2, 0.0, 1);
        let expected: TileGrid = "
            0000
            4100
            0041
            0000
        "
        .parse()
        .unwrap();
        assert_eq!(fixture.solution(), &expected);
    }

    #[test]
    fn test_frame() {
        let interior: TileGrid = "ab\ncd".parse().unwrap();
        let expected: TileGrid = "
            0000
            4ab0
            0cd1
            0000
        "
        .parse()
        .unwrap();
        assert_eq!(PuzzleFixture::frame(&interior), expected);
    }

    #[test]
    #[should_panic(expected = "fill ratio must be between 0 and 1")]
    fn test_rejects_bad_fill_ratio() {
        let _ = PuzzleFixture::generate(2, 2, 1.5, 0);
    }
}
