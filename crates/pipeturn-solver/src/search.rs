//! Depth-first search over rotation choices.
//!
//! Each frame picks the free cell with the fewest candidates, tries its
//! rotations in ascending order on a copy of the state, and lets
//! [`propagate`](crate::propagation::propagate) carry the consequences. A
//! branch that contradicts is dropped; a branch that validates is returned;
//! anything else is searched deeper.

use pipeturn_core::{RotationSet, TileGrid};

use crate::{PuzzleState, SolverError, propagation};

/// Counters collected by [`search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    branches: usize,
    backtracks: usize,
    max_depth: usize,
}

impl SearchStats {
    /// Returns the number of candidate rotations tried.
    #[must_use]
    pub fn branches(&self) -> usize {
        self.branches
    }

    /// Returns the number of tried candidates that led to no solution.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Returns the deepest nesting of choices reached.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Adds the counters of `other` into `self`.
    ///
    /// Branch and backtrack counts are summed, the depth is the maximum.
    pub fn merge(&mut self, other: &Self) {
        self.branches += other.branches;
        self.backtracks += other.backtracks;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Searches for a rotation of every free cell that makes `state` safe.
///
/// The search is deterministic: the most constrained cell is chosen first
/// (row-major on ties) and its candidates are tried in ascending order.
///
/// # Errors
///
/// Returns [`SolverError::Unsolvable`] if no choice of rotations yields a
/// safe grid.
///
/// # Examples
///
/// ```
/// use pipeturn_core::TileGrid;
/// use pipeturn_solver::{PuzzleState, search};
///
/// let grid: TileGrid = "
///     0000
///     4530
///     0061
///     0000
/// "
/// .parse()?;
/// let state = PuzzleState::from_puzzle(grid)?;
/// let mut stats = search::SearchStats::default();
/// let solved = search::search(&state, &mut stats)?;
///
/// assert!(solved.is_safe());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn search(state: &PuzzleState, stats: &mut SearchStats) -> Result<TileGrid, SolverError> {
    search_at(state, stats, 1)
}

fn search_at(
    state: &PuzzleState,
    stats: &mut SearchStats,
    depth: usize,
) -> Result<TileGrid, SolverError> {
    let Some((pos, candidates)) = state.domain().most_constrained() else {
        if state.grid().is_safe() {
            return Ok(state.grid().clone());
        }
        return Err(SolverError::Unsolvable);
    };
    stats.max_depth = stats.max_depth.max(depth);

    for rotation in candidates {
        stats.branches += 1;
        let mut branch = state.clone();
        let propagated = branch
            .restrict(pos, RotationSet::from_elem(rotation))
            .and_then(|()| propagation::propagate(&mut branch));
        if let Err(err) = propagated {
            log::trace!("depth {depth}: {rotation} at {pos} rejected: {err}");
            stats.backtracks += 1;
            continue;
        }
        if branch.grid().is_safe() {
            return Ok(branch.into_grid());
        }
        match search_at(&branch, stats, depth + 1) {
            Ok(solved) => return Ok(solved),
            Err(SolverError::Unsolvable) => {
                log::trace!("depth {depth}: {rotation} at {pos} exhausted");
                stats.backtracks += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Err(SolverError::Unsolvable)
}
