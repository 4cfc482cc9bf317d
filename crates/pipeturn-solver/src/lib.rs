//! Solver for rotational pipe puzzles.
//!
//! Given a grid whose border ring is in place and whose interior tiles are
//! turned arbitrarily, [`PipeSolver`] finds a rotation of every interior tile
//! such that all neighbouring tiles agree on their shared edges.
//!
//! # Overview
//!
//! - [`PuzzleState`]: tiles, the immutable mask and the [`RotationDomain`]
//!   of every free cell
//! - [`propagation`]: constraint propagation to a fixpoint
//! - [`cluster`]: splitting unresolved cells into independent sub-puzzles
//! - [`search`]: depth-first search with the most-constrained-cell heuristic
//! - [`PipeSolver`]: the full pipeline and its [`SolverStats`]
//! - [`testing`]: seeded puzzle fixtures
//!
//! # Examples
//!
//! ```
//! use pipeturn_solver::{PipeSolver, testing::PuzzleFixture};
//!
//! let fixture = PuzzleFixture::generate(6, 8, 0.55, 2024);
//! let (solved, stats) = PipeSolver::new().solve(fixture.scrambled())?;
//!
//! assert!(solved.is_safe());
//! println!(
//!     "{:.0}% resolved by propagation, {} clusters searched",
//!     stats.propagation_ratio() * 100.0,
//!     stats.clusters()
//! );
//! # Ok::<(), pipeturn_solver::SolverError>(())
//! ```

pub use self::{error::*, solver::*, state::*};

pub mod cluster;
mod error;
pub mod propagation;
pub mod search;
mod solver;
mod state;
pub mod testing;
