//! Constraint propagation over rotation domains.
//!
//! Propagation repeatedly commits cells whose domain holds a single rotation
//! and removes, from each free neighbour, every rotation that would disagree
//! with the committed tile on the shared edge. It stops at a fixpoint where
//! no free cell has a singleton domain, or fails as soon as some domain
//! becomes empty.
//!
//! # Examples
//!
//! ```
//! use pipeturn_core::TileGrid;
//! use pipeturn_solver::{PuzzleState, propagation};
//!
//! // Every interior tile has a single rotation that fits the ring.
//! let grid: TileGrid = "
//!     0000
//!     4a60
//!     0031
//!     0000
//! "
//! .parse()?;
//! let mut state = PuzzleState::from_puzzle(grid)?;
//! let stats = propagation::propagate(&mut state)?;
//!
//! assert_eq!(stats.committed(), 4);
//! assert!(state.domain().is_empty());
//! assert!(state.grid().is_safe());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::VecDeque;

use pipeturn_core::{Position, RotationSet, Side, rules};

use crate::{PuzzleState, SolverError};

/// Counters collected by a single [`propagate`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    committed: usize,
    pruned: usize,
}

impl PropagationStats {
    /// Returns the number of cells committed to their final orientation.
    #[must_use]
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Returns the number of candidate rotations removed from domains.
    #[must_use]
    pub fn pruned(&self) -> usize {
        self.pruned
    }
}

/// Runs constraint propagation to a fixpoint, mutating `state` in place.
///
/// Edges between two fixed cells are checked first. Free cells next to fixed
/// cells are then revised against them, so that border and cluster halo
/// constraints reach the interior. Then every
/// singleton cell is committed and its free neighbours pruned; neighbours
/// whose domain shrank are revisited.
///
/// Running it again on its own output changes nothing.
///
/// # Errors
///
/// Returns [`SolverError::Contradiction`] if two fixed cells disagree on
/// their shared edge or a cell runs out of candidates.
/// `state` is then partially updated and should be discarded.
pub fn propagate(state: &mut PuzzleState) -> Result<PropagationStats, SolverError> {
    state.check_fixed_edges()?;

    let mut stats = PropagationStats::default();
    let mut worklist = VecDeque::new();

    let free: Vec<Position> = state.domain().positions().collect();
    for pos in free {
        for (side, neighbor) in state.grid().neighbors(pos) {
            if state.is_fixed(neighbor) {
                revise(state, pos, side, neighbor, &mut stats)?;
            }
        }
        if state.domain().get(pos).is_some_and(|d| d.len() == 1) {
            worklist.push_back(pos);
        }
    }

    while let Some(pos) = worklist.pop_front() {
        let Some(rotation) = state.domain().get(pos).and_then(RotationSet::as_single) else {
            continue;
        };
        state.commit(pos, rotation);
        stats.committed += 1;

        for (side, neighbor) in state.grid().neighbors(pos) {
            if state.is_fixed(neighbor) {
                continue;
            }
            // `neighbor` sees the committed cell across the opposite side.
            if revise(state, neighbor, side.opposite(), pos, &mut stats)? {
                worklist.push_back(neighbor);
            }
        }
    }

    log::trace!(
        "propagation committed {} cells, pruned {} candidates",
        stats.committed,
        stats.pruned
    );
    Ok(stats)
}

/// Drops the candidates of the free cell at `pos` that disagree with the
/// fixed cell `fixed`, lying across `side` of `pos`.
///
/// Returns `true` if the domain shrank.
fn revise(
    state: &mut PuzzleState,
    pos: Position,
    side: Side,
    fixed: Position,
    stats: &mut PropagationStats,
) -> Result<bool, SolverError> {
    let Some(before) = state.domain().get(pos) else {
        return Ok(false);
    };
    let tile = state.grid()[pos];
    let neighbor = state.grid()[fixed];
    let after = before.filter(|rotation| rules::compatible(tile.rotate(rotation), side, neighbor));
    if after.is_empty() {
        log::trace!("contradiction at {pos}: no rotation fits the tile at {fixed}");
        return Err(SolverError::Contradiction { position: pos });
    }
    if after == before {
        return Ok(false);
    }
    stats.pruned += before.len() - after.len();
    state.domain_mut().set(pos, after);
    Ok(true)
}
