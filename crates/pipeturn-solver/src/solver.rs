use pipeturn_core::TileGrid;
use rayon::prelude::*;

use crate::{
    PuzzleState, SolverError,
    cluster::{self, Cluster},
    propagation,
    search::{self, SearchStats},
};

/// Statistics collected while solving a puzzle.
///
/// # Examples
///
/// ```
/// use pipeturn_core::TileGrid;
/// use pipeturn_solver::PipeSolver;
///
/// let grid: TileGrid = "
///     0000
///     4a60
///     0031
///     0000
/// "
/// .parse()?;
/// let (_solved, stats) = PipeSolver::new().solve(&grid)?;
///
/// assert_eq!(stats.interior_cells(), 4);
/// assert_eq!(stats.resolved_by_propagation(), 4);
/// assert_eq!(stats.clusters(), 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    interior_cells: usize,
    resolved_by_propagation: usize,
    clusters: usize,
    search: SearchStats,
}

impl SolverStats {
    /// Returns the number of cells inside the border ring.
    #[must_use]
    pub fn interior_cells(&self) -> usize {
        self.interior_cells
    }

    /// Returns the number of interior cells committed by the initial
    /// propagation pass.
    #[must_use]
    pub fn resolved_by_propagation(&self) -> usize {
        self.resolved_by_propagation
    }

    /// Returns the fraction of interior cells resolved by propagation alone.
    ///
    /// A puzzle without interior cells counts as fully resolved.
    #[must_use]
    pub fn propagation_ratio(&self) -> f64 {
        if self.interior_cells == 0 {
            return 1.0;
        }
        #[expect(clippy::cast_precision_loss)]
        let ratio = self.resolved_by_propagation as f64 / self.interior_cells as f64;
        ratio
    }

    /// Returns the number of clusters handed to the search.
    #[must_use]
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Returns the search counters, merged over every cluster.
    #[must_use]
    pub fn search(&self) -> &SearchStats {
        &self.search
    }
}

/// Solves rotational pipe puzzles.
///
/// Solving runs in three stages:
///
/// 1. Every interior cell gets the rotations its shape allows, the border
///    ring is fixed, and constraint propagation runs over the whole grid.
/// 2. If the grid is not safe yet, the unresolved cells are split into
///    independent clusters.
/// 3. Each cluster is searched on its own and the results are stitched back.
///
/// The returned grid always passes [`TileGrid::is_safe`].
///
/// # Examples
///
/// ```
/// use pipeturn_core::TileGrid;
/// use pipeturn_solver::{PipeSolver, SolverError};
///
/// let grid: TileGrid = "
///     00000
///     4aaa1
///     01100
///     01100
///     00000
/// "
/// .parse()?;
/// let solver = PipeSolver::new().with_parallel_clusters(true);
/// match solver.solve(&grid) {
///     Ok((solved, stats)) => {
///         assert!(solved.is_safe());
///         println!("{} clusters searched", stats.clusters());
///     }
///     Err(SolverError::Unsolvable) => println!("no solution"),
///     Err(err) => return Err(err.into()),
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipeSolver {
    parallel_clusters: bool,
}

impl PipeSolver {
    /// Creates a solver that searches clusters one after another.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches independent clusters on the rayon thread pool when `enabled`.
    ///
    /// The result does not depend on this setting.
    #[must_use]
    pub fn with_parallel_clusters(mut self, enabled: bool) -> Self {
        self.parallel_clusters = enabled;
        self
    }

    /// Returns `true` if clusters are searched in parallel.
    #[must_use]
    pub fn parallel_clusters(&self) -> bool {
        self.parallel_clusters
    }

    /// Solves `grid`, returning the solved grid and fresh statistics.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidInput`] if the grid is not a well-formed puzzle.
    /// - [`SolverError::Unsolvable`] if no rotation of the interior tiles
    ///   connects every edge.
    pub fn solve(&self, grid: &TileGrid) -> Result<(TileGrid, SolverStats), SolverError> {
        let mut stats = SolverStats::default();
        let solved = self.solve_with_stats(grid, &mut stats)?;
        Ok((solved, stats))
    }

    /// Solves `grid`, recording statistics into `stats`.
    ///
    /// This is similar to [`solve`](Self::solve), but lets the caller keep
    /// the statistics gathered before a failure.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve).
    pub fn solve_with_stats(
        &self,
        grid: &TileGrid,
        stats: &mut SolverStats,
    ) -> Result<TileGrid, SolverError> {
        let mut state = PuzzleState::from_puzzle(grid.clone()).map_err(into_unsolvable)?;
        stats.interior_cells = state.free_count();

        let propagated = propagation::propagate(&mut state).map_err(into_unsolvable)?;
        stats.resolved_by_propagation = propagated.committed();
        log::info!(
            "{:.1}% of tiles resolved by propagation ({}/{})",
            stats.propagation_ratio() * 100.0,
            stats.resolved_by_propagation,
            stats.interior_cells
        );

        if state.grid().is_safe() {
            return Ok(state.into_grid());
        }

        let clusters = cluster::decompose(&state);
        stats.clusters = clusters.len();
        log::info!("{} clusters left to search", clusters.len());

        let mut solved = state.into_grid();
        if self.parallel_clusters {
            let results: Vec<_> = clusters.par_iter().map(solve_cluster).collect();
            for (_, search_stats) in &results {
                stats.search.merge(search_stats);
            }
            for (cluster, (result, _)) in clusters.iter().zip(results) {
                cluster.write_back(&result?, &mut solved);
            }
        } else {
            // Stops at the first cluster without a solution.
            for cluster in &clusters {
                let (result, search_stats) = solve_cluster(cluster);
                stats.search.merge(&search_stats);
                cluster.write_back(&result?, &mut solved);
            }
        }

        if let Some((pos, side)) = solved.first_violation() {
            log::warn!("assembled grid is not safe at {pos} ({side:?} edge)");
            return Err(SolverError::Unsolvable);
        }
        Ok(solved)
    }
}

fn solve_cluster(cluster: &Cluster) -> (Result<TileGrid, SolverError>, SearchStats) {
    let mut stats = SearchStats::default();
    let result = search::search(cluster.state(), &mut stats);
    log::debug!(
        "cluster at {} with {} free cells: {} branches, {} backtracks, depth {}",
        cluster.origin(),
        cluster.len(),
        stats.branches(),
        stats.backtracks(),
        stats.max_depth()
    );
    (result.map_err(into_unsolvable), stats)
}

/// Outside a search frame, a contradiction means the puzzle has no solution.
fn into_unsolvable(err: SolverError) -> SolverError {
    if err.is_contradiction() {
        SolverError::Unsolvable
    } else {
        err
    }
}
