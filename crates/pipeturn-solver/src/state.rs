use pipeturn_core::{Grid, Position, Rotation, RotationSet, Side, Tile, TileGrid, rules};

use crate::{InputError, SolverError};

/// Remaining candidate rotations of every unresolved cell.
///
/// A position holds a set exactly while the cell is free. Resolved cells hold
/// `None`. An empty set is never stored; reaching one is reported as
/// [`SolverError::Contradiction`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationDomain {
    cells: Grid<Option<RotationSet>>,
}

impl RotationDomain {
    /// Creates a domain for a `rows` x `cols` grid with no free cells.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Grid::filled(rows, cols, None),
        }
    }

    /// Returns the candidates of the cell at `pos`, or `None` if it is resolved.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<RotationSet> {
        self.cells.get(pos).copied().flatten()
    }

    /// Replaces the candidates of the cell at `pos`.
    pub fn set(&mut self, pos: Position, candidates: RotationSet) {
        debug_assert!(!candidates.is_empty(), "empty domain stored at {pos}");
        self.cells[pos] = Some(candidates);
    }

    /// Drops the cell at `pos` from the domain, returning its candidates.
    pub fn remove(&mut self, pos: Position) -> Option<RotationSet> {
        self.cells[pos].take()
    }

    /// Iterates over the free positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .positions()
            .filter(|&pos| self.cells[pos].is_some())
    }

    /// Iterates over the free positions and their candidates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, RotationSet)> + '_ {
        self.cells
            .positions()
            .filter_map(|pos| self.cells[pos].map(|candidates| (pos, candidates)))
    }

    /// Returns the number of free cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Returns `true` if every cell is resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Returns the free cell with the fewest candidates.
    ///
    /// Ties are broken in row-major order, so the search is reproducible.
    #[must_use]
    pub fn most_constrained(&self) -> Option<(Position, RotationSet)> {
        let mut best: Option<(Position, RotationSet)> = None;
        for (pos, candidates) in self.iter() {
            if best.is_none_or(|(_, current)| candidates.len() < current.len()) {
                best = Some((pos, candidates));
            }
        }
        best
    }
}

/// The working state of a (sub-)puzzle: tiles, the immutable mask and the
/// rotation domain of every free cell.
///
/// # Invariants
///
/// - `fixed[pos]` is `false` exactly when `domain.get(pos)` is `Some`.
/// - Free tiles keep the orientation they had in the input; the chosen
///   rotation is applied only when the cell is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    grid: TileGrid,
    fixed: Grid<bool>,
    domain: RotationDomain,
}

impl PuzzleState {
    /// Builds the initial state of a puzzle produced by a generator.
    ///
    /// The outer ring, entrance and exit included, is fixed as given. Every
    /// interior cell starts free with [`Tile::distinct_rotations`].
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidInput`] if the grid is smaller than 3x3, or
    ///   if the left border does not hold exactly one entrance or the right
    ///   border exactly one exit.
    /// - [`SolverError::Contradiction`] if two adjacent ring cells disagree.
    pub fn from_puzzle(grid: TileGrid) -> Result<Self, SolverError> {
        let (rows, cols) = (grid.rows(), grid.cols());
        if rows < 3 || cols < 3 {
            return Err(InputError::TooSmall { rows, cols }.into());
        }

        let entrances = (1..rows - 1)
            .filter(|&row| grid[Position::new(row, 0)] == Tile::ENTRANCE)
            .count();
        if entrances != 1 {
            return Err(InputError::MissingEntrance { found: entrances }.into());
        }
        let exits = (1..rows - 1)
            .filter(|&row| grid[Position::new(row, cols - 1)] == Tile::EXIT)
            .count();
        if exits != 1 {
            return Err(InputError::MissingExit { found: exits }.into());
        }

        let mut fixed = Grid::filled(rows, cols, true);
        let mut domain = RotationDomain::new(rows, cols);
        for pos in grid.positions() {
            if !grid.is_border(pos) {
                fixed[pos] = false;
                domain.set(pos, grid[pos].distinct_rotations());
            }
        }

        let state = Self {
            grid,
            fixed,
            domain,
        };
        state.check_fixed_edges()?;
        Ok(state)
    }

    /// Assembles a state from its parts.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ, or (in debug builds) if the mask and the
    /// domain disagree on which cells are free.
    #[must_use]
    pub fn from_parts(grid: TileGrid, fixed: Grid<bool>, domain: RotationDomain) -> Self {
        assert_eq!(
            (grid.rows(), grid.cols()),
            (fixed.rows(), fixed.cols()),
            "mask shape differs from grid shape"
        );
        assert_eq!(
            (grid.rows(), grid.cols()),
            (domain.cells.rows(), domain.cells.cols()),
            "domain shape differs from grid shape"
        );
        debug_assert!(
            fixed
                .positions()
                .all(|pos| fixed[pos] == domain.get(pos).is_none()),
            "immutable mask and rotation domain disagree"
        );
        Self {
            grid,
            fixed,
            domain,
        }
    }

    /// Returns the tiles, free tiles still in their input orientation.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Returns the immutable mask.
    #[must_use]
    pub fn fixed(&self) -> &Grid<bool> {
        &self.fixed
    }

    /// Returns the rotation domain.
    #[must_use]
    pub fn domain(&self) -> &RotationDomain {
        &self.domain
    }

    /// Returns `true` if the cell at `pos` has its final orientation.
    #[must_use]
    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed[pos]
    }

    /// Returns the number of free cells.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.fixed.iter().filter(|&&fixed| !fixed).count()
    }

    /// Consumes the state and returns its tiles.
    #[must_use]
    pub fn into_grid(self) -> TileGrid {
        self.grid
    }

    /// Narrows the candidates of the free cell at `pos` to those also in
    /// `candidates`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Contradiction`] if no candidate is left.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already fixed.
    pub fn restrict(&mut self, pos: Position, candidates: RotationSet) -> Result<(), SolverError> {
        let current = self
            .domain
            .get(pos)
            .unwrap_or_else(|| panic!("cannot restrict fixed cell {pos}"));
        let narrowed = current & candidates;
        if narrowed.is_empty() {
            return Err(SolverError::Contradiction { position: pos });
        }
        self.domain.set(pos, narrowed);
        Ok(())
    }

    /// Fixes the cell at `pos` in its final orientation.
    pub(crate) fn commit(&mut self, pos: Position, rotation: Rotation) {
        self.grid[pos] = self.grid[pos].rotate(rotation);
        self.fixed[pos] = true;
        self.domain.remove(pos);
    }

    pub(crate) fn domain_mut(&mut self) -> &mut RotationDomain {
        &mut self.domain
    }

    /// Checks every edge between two fixed cells.
    pub(crate) fn check_fixed_edges(&self) -> Result<(), SolverError> {
        for pos in self.grid.positions() {
            if !self.fixed[pos] {
                continue;
            }
            for side in [Side::Right, Side::Bottom] {
                let Some(neighbor) = pos.neighbor(side) else {
                    continue;
                };
                if self.fixed.get(neighbor) == Some(&true)
                    && !rules::compatible(self.grid[pos], side, self.grid[neighbor])
                {
                    return Err(SolverError::Contradiction { position: neighbor });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pipeturn_core::Rotation::*;

    use super::*;

    fn standard_grid() -> TileGrid {
        "
        0000
        4a60
        0031
        0000
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn test_from_puzzle_fixes_ring() {
        let state = PuzzleState::from_puzzle(standard_grid()).unwrap();
        assert_eq!(state.free_count(), 4);
        assert_eq!(state.domain().len(), 4);
        for pos in state.grid().positions() {
            assert_eq!(state.is_fixed(pos), state.grid().is_border(pos));
        }
    }

    #[test]
    fn test_from_puzzle_initial_domains() {
        let state = PuzzleState::from_puzzle(standard_grid()).unwrap();
        // straight pipe
        assert_eq!(
            state.domain().get(Position::new(1, 1)),
            Some(RotationSet::HALF)
        );
        // elbow
        assert_eq!(
            state.domain().get(Position::new(1, 2)),
            Some(RotationSet::FULL)
        );
        assert_eq!(state.domain().get(Position::new(0, 0)), None);
    }

    #[test]
    fn test_from_puzzle_rejects_small_grid() {
        let grid: TileGrid = "000\n400".parse().unwrap();
        assert_eq!(
            PuzzleState::from_puzzle(grid),
            Err(SolverError::InvalidInput(InputError::TooSmall {
                rows: 2,
                cols: 3
            }))
        );
    }

    #[test]
    fn test_from_puzzle_requires_entrance_and_exit() {
        let no_entrance: TileGrid = "000\n0f1\n000".parse().unwrap();
        assert_eq!(
            PuzzleState::from_puzzle(no_entrance),
            Err(SolverError::InvalidInput(InputError::MissingEntrance {
                found: 0
            }))
        );
        let no_exit: TileGrid = "000\n4f0\n000".parse().unwrap();
        assert_eq!(
            PuzzleState::from_puzzle(no_exit),
            Err(SolverError::InvalidInput(InputError::MissingExit { found: 0 }))
        );
    }

    #[test]
    fn test_from_puzzle_rejects_inconsistent_ring() {
        // The top-left corner opens into the wall beside it.
        let grid: TileGrid = "
            4000
            4a31
            0c60
            0000
        "
        .parse()
        .unwrap();
        assert_eq!(
            PuzzleState::from_puzzle(grid),
            Err(SolverError::Contradiction {
                position: Position::new(0, 1)
            })
        );
    }

    #[test]
    fn test_most_constrained_breaks_ties_row_major() {
        let mut domain = RotationDomain::new(3, 3);
        domain.set(Position::new(2, 0), RotationSet::HALF);
        domain.set(Position::new(1, 2), RotationSet::HALF);
        domain.set(Position::new(0, 1), RotationSet::FULL);
        assert_eq!(
            domain.most_constrained(),
            Some((Position::new(1, 2), RotationSet::HALF))
        );
        assert_eq!(RotationDomain::new(2, 2).most_constrained(), None);
    }

    #[test]
    fn test_commit_rotates_and_fixes() {
        let mut state = PuzzleState::from_puzzle(standard_grid()).unwrap();
        let pos = Position::new(1, 1);
        state.commit(pos, R1);
        assert_eq!(state.grid()[pos], Tile::STRAIGHT_HORIZONTAL);
        assert!(state.is_fixed(pos));
        assert_eq!(state.domain().get(pos), None);
        assert_eq!(state.free_count(), 3);
    }

    #[test]
    fn test_restrict_intersects() {
        let mut state = PuzzleState::from_puzzle(standard_grid()).unwrap();
        let pos = Position::new(1, 2);
        state.restrict(pos, RotationSet::from_iter([R1, R2])).unwrap();
        state.restrict(pos, RotationSet::from_iter([R2, R3])).unwrap();
        assert_eq!(state.domain().get(pos), Some(RotationSet::from_elem(R2)));
        assert_eq!(
            state.restrict(pos, RotationSet::from_elem(R0)),
            Err(SolverError::Contradiction { position: pos })
        );
    }
}
