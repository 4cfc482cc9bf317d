use pipeturn_core::Position;

/// Errors that can occur while solving a puzzle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
    derive_more::IsVariant,
)]
pub enum SolverError {
    /// A cell has no rotation left that fits its neighbours.
    ///
    /// This is recoverable inside the search: the branch that caused it is
    /// discarded and the next candidate is tried.
    #[display("no rotation of the tile at {position} fits its neighbours")]
    Contradiction {
        /// The cell whose domain became empty.
        position: Position,
    },
    /// Every candidate of a search frame failed.
    ///
    /// Returned from [`PipeSolver::solve`](crate::PipeSolver::solve) when the
    /// puzzle has no solution.
    #[display("the puzzle has no solution")]
    Unsolvable,
    /// The input grid is malformed.
    #[display("invalid puzzle: {_0}")]
    InvalidInput(#[from] InputError),
}

/// Reasons an input grid is rejected before solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    /// The grid cannot hold a border ring around at least one interior cell.
    #[display("grid must be at least 3x3 including its border, got {rows}x{cols}")]
    TooSmall {
        /// Number of rows, border included.
        rows: usize,
        /// Number of columns, border included.
        cols: usize,
    },
    /// The left border has no single entrance cell.
    #[display("expected exactly one entrance on the left border, found {found}")]
    MissingEntrance {
        /// Number of entrance tiles found.
        found: usize,
    },
    /// The right border has no single exit cell.
    #[display("expected exactly one exit on the right border, found {found}")]
    MissingExit {
        /// Number of exit tiles found.
        found: usize,
    },
}
