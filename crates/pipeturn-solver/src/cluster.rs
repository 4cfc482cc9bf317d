//! Splitting the unresolved cells into independent sub-puzzles.
//!
//! After propagation, the free cells form 4-connected regions separated by
//! fixed cells. No edge joins two regions, so each one can be searched on its
//! own once the fixed cells around it are baked in as constraints.
//!
//! Each [`Cluster`] owns a local [`PuzzleState`] covering the bounding box of
//! its region plus a one-cell halo. Region cells keep their global tiles and
//! candidates. Every other local cell is fixed: a halo cell that touches the
//! region carries the facing openings of the real neighbour, anything else is
//! a wall.

use pipeturn_core::{Grid, Position, Tile, TileGrid};

use crate::{PuzzleState, RotationDomain};

/// A connected region of free cells with its surrounding constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    origin: Position,
    state: PuzzleState,
}

impl Cluster {
    /// Returns the global position of the local cell `(1, 1)`, the top-left
    /// corner of the region's bounding box.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Returns the local sub-puzzle.
    #[must_use]
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Returns the number of free cells in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.free_count()
    }

    /// Returns `true` if the region holds no free cell.
    ///
    /// Clusters built by [`decompose`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps a local position back to the global grid.
    ///
    /// Returns `None` for halo positions and positions outside the local grid.
    #[must_use]
    pub fn to_global(&self, local: Position) -> Option<Position> {
        let grid = self.state.grid();
        let inside = (1..grid.rows() - 1).contains(&local.row())
            && (1..grid.cols() - 1).contains(&local.col());
        inside.then(|| {
            Position::new(
                self.origin.row() + local.row() - 1,
                self.origin.col() + local.col() - 1,
            )
        })
    }

    /// Copies the region's cells from a solved local grid into `global`.
    ///
    /// Only cells free in the local state are written, so halo cells never
    /// overwrite their global counterparts.
    ///
    /// # Panics
    ///
    /// Panics if `solved` does not have the local grid's shape.
    pub fn write_back(&self, solved: &TileGrid, global: &mut TileGrid) {
        assert_eq!(
            (solved.rows(), solved.cols()),
            (self.state.grid().rows(), self.state.grid().cols()),
            "solved grid does not match the cluster shape"
        );
        for local in solved.positions() {
            if self.state.is_fixed(local) {
                continue;
            }
            if let Some(pos) = self.to_global(local) {
                global[pos] = solved[local];
            }
        }
    }
}

/// Splits the free cells of `state` into clusters.
///
/// Clusters are returned in row-major order of their first cell. A state
/// with no free cell yields no cluster.
#[must_use]
pub fn decompose(state: &PuzzleState) -> Vec<Cluster> {
    let grid = state.grid();
    let mut visited = Grid::filled(grid.rows(), grid.cols(), false);
    let mut clusters = vec![];

    for start in state.domain().positions() {
        if visited[start] {
            continue;
        }
        let region = flood_fill(state, start, &mut visited);
        clusters.push(build_cluster(state, &region));
    }
    clusters
}

/// Collects the free cells 4-connected to `start`.
fn flood_fill(state: &PuzzleState, start: Position, visited: &mut Grid<bool>) -> Vec<Position> {
    let mut region = vec![];
    let mut stack = vec![start];
    visited[start] = true;
    while let Some(pos) = stack.pop() {
        region.push(pos);
        for (_, neighbor) in state.grid().neighbors(pos) {
            if !visited[neighbor] && !state.is_fixed(neighbor) {
                visited[neighbor] = true;
                stack.push(neighbor);
            }
        }
    }
    region
}

fn build_cluster(state: &PuzzleState, region: &[Position]) -> Cluster {
    let global = state.grid();
    let (mut min_row, mut min_col) = (usize::MAX, usize::MAX);
    let (mut max_row, mut max_col) = (0, 0);
    for pos in region {
        min_row = min_row.min(pos.row());
        min_col = min_col.min(pos.col());
        max_row = max_row.max(pos.row());
        max_col = max_col.max(pos.col());
    }
    let origin = Position::new(min_row, min_col);
    let rows = max_row - min_row + 3;
    let cols = max_col - min_col + 3;
    let to_local = |pos: Position| {
        Position::new(pos.row() + 1 - origin.row(), pos.col() + 1 - origin.col())
    };

    let mut tiles = TileGrid::filled(rows, cols, Tile::WALL);
    let mut fixed = Grid::filled(rows, cols, true);
    let mut domain = RotationDomain::new(rows, cols);
    for &pos in region {
        let local = to_local(pos);
        tiles[local] = global[pos];
        fixed[local] = false;
        if let Some(candidates) = state.domain().get(pos) {
            domain.set(local, candidates);
        }
    }
    for &pos in region {
        let local = to_local(pos);
        for (side, halo) in tiles.neighbors(local) {
            if !fixed[halo] {
                continue;
            }
            // Neighbours off the global grid stay closed.
            if let Some(neighbor) = pos.neighbor(side).filter(|&n| global.contains(n)) {
                tiles[halo] |= global[neighbor] & side.opposite().flag();
            }
        }
    }

    Cluster {
        origin,
        state: PuzzleState::from_parts(tiles, fixed, domain),
    }
}

#[cfg(test)]
mod tests {
    use pipeturn_core::{Rotation, RotationSet};

    use super::*;

    fn sample_state() -> PuzzleState {
        let grid: TileGrid = "
            00000
            43f60
            00091
            00000
        "
        .parse()
        .unwrap();
        let mut fixed = Grid::filled(grid.rows(), grid.cols(), true);
        let mut domain = RotationDomain::new(grid.rows(), grid.cols());
        for pos in [
            Position::new(1, 1),
            Position::new(1, 3),
            Position::new(2, 3),
        ] {
            fixed[pos] = false;
            domain.set(pos, RotationSet::FULL);
        }
        PuzzleState::from_parts(grid, fixed, domain)
    }

    #[test]
    fn test_decompose_finds_regions_in_row_major_order() {
        let clusters = decompose(&sample_state());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].origin(), Position::new(1, 1));
        assert_eq!(clusters[0].len(), 1);
        assert_eq!(clusters[1].origin(), Position::new(1, 3));
        assert_eq!(clusters[1].len(), 2);
    }

    #[test]
    fn test_halo_inherits_facing_openings() {
        let clusters = decompose(&sample_state());

        let expected: TileGrid = "
            000
            431
            000
        "
        .parse()
        .unwrap();
        assert_eq!(clusters[0].state().grid(), &expected);

        // The cross only shows its right opening, the exit its left one.
        let expected: TileGrid = "
            000
            460
            091
            000
        "
        .parse()
        .unwrap();
        assert_eq!(clusters[1].state().grid(), &expected);
        assert!(!clusters[1].state().is_fixed(Position::new(2, 1)));
        assert!(clusters[1].state().is_fixed(Position::new(2, 2)));
        assert_eq!(
            clusters[1].state().domain().get(Position::new(2, 1)),
            Some(RotationSet::FULL)
        );
    }

    #[test]
    fn test_off_grid_neighbors_stay_closed() {
        // A free cell on the grid edge.
        let grid: TileGrid = "f4".parse().unwrap();
        let mut fixed = Grid::filled(1, 2, true);
        let mut domain = RotationDomain::new(1, 2);
        fixed[Position::new(0, 0)] = false;
        domain.set(Position::new(0, 0), RotationSet::from_elem(Rotation::R0));
        let state = PuzzleState::from_parts(grid, fixed, domain);

        let clusters = decompose(&state);
        assert_eq!(clusters.len(), 1);
        let expected: TileGrid = "
            000
            0f0
            000
        "
        .parse()
        .unwrap();
        assert_eq!(clusters[0].state().grid(), &expected);
        assert_eq!(clusters[0].state().grid()[Position::new(1, 2)], Tile::WALL);
    }

    #[test]
    fn test_to_global() {
        let clusters = decompose(&sample_state());
        let cluster = &clusters[1];
        assert_eq!(
            cluster.to_global(Position::new(1, 1)),
            Some(Position::new(1, 3))
        );
        assert_eq!(
            cluster.to_global(Position::new(2, 1)),
            Some(Position::new(2, 3))
        );
        assert_eq!(cluster.to_global(Position::new(0, 1)), None);
        assert_eq!(cluster.to_global(Position::new(2, 2)), None);
        assert_eq!(cluster.to_global(Position::new(9, 9)), None);
    }

    #[test]
    fn test_reassembly_without_search_is_identity() {
        let state = sample_state();
        let mut reassembled = state.grid().clone();
        for cluster in decompose(&state) {
            cluster.write_back(cluster.state().grid(), &mut reassembled);
        }
        assert_eq!(&reassembled, state.grid());
    }

    #[test]
    fn test_write_back_only_touches_region() {
        let state = sample_state();
        let clusters = decompose(&state);
        let cluster = &clusters[0];

        let mut solved = cluster.state().grid().clone();
        solved[Position::new(1, 1)] = Tile::STRAIGHT_HORIZONTAL;
        solved[Position::new(1, 0)] = Tile::WALL;
        solved[Position::new(1, 2)] = Tile::WALL;

        let mut global = state.grid().clone();
        cluster.write_back(&solved, &mut global);
        assert_eq!(global[Position::new(1, 1)], Tile::STRAIGHT_HORIZONTAL);
        assert_eq!(global[Position::new(1, 0)], Tile::ENTRANCE);
        assert_eq!(global[Position::new(1, 2)], Tile::CROSS);
    }

    #[test]
    fn test_no_free_cells() {
        let grid: TileGrid = "00\n00".parse().unwrap();
        let state =
            PuzzleState::from_parts(grid, Grid::filled(2, 2, true), RotationDomain::new(2, 2));
        assert!(decompose(&state).is_empty());
    }
}
