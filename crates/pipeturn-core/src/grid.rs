//! Rectangular grids of cells.
//!
//! [`Grid`] is a row-major container indexed by [`Position`]. The solver uses
//! it for tiles ([`TileGrid`]), for the immutable mask (`Grid<bool>`), and for
//! per-cell rotation domains.
//!
//! # Text format
//!
//! A [`TileGrid`] parses from and prints to one line per row with one
//! hexadecimal digit per tile. Whitespace inside a line is ignored, so rows
//! may be grouped for readability:
//!
//! ```
//! use pipeturn_core::{Position, Tile, TileGrid};
//!
//! let grid: TileGrid = "
//!     0000
//!     4a30
//!     0361
//!     0000
//! "
//! .parse()?;
//!
//! assert_eq!(grid.rows(), 4);
//! assert_eq!(grid[Position::new(1, 0)], Tile::ENTRANCE);
//! # Ok::<(), pipeturn_core::GridParseError>(())
//! ```

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{Index, IndexMut},
    str::FromStr,
};

use crate::{Position, Side, Tile, rules};

/// A rectangular, row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

/// A grid of pipe tiles.
pub type TileGrid = Grid<Tile>;

impl<T: Clone> Grid<T> {
    /// Creates a `rows` x `cols` grid with every cell set to `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Creates a grid from a list of equally long rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridShapeError`] if the rows differ in length.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridShapeError>
    where
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut row_count = 0;
        let mut cols = None;
        for row in rows {
            let before = cells.len();
            cells.extend(row);
            let len = cells.len() - before;
            match cols {
                None => cols = Some(len),
                Some(expected) if expected != len => {
                    return Err(GridShapeError {
                        row: row_count,
                        expected,
                        found: len,
                    });
                }
                Some(_) => {}
            }
            row_count += 1;
        }
        Ok(Self {
            rows: row_count,
            cols: cols.unwrap_or(0),
            cells,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.rows && pos.col() < self.cols
    }

    /// Returns `true` if `pos` lies on the outermost ring of the grid.
    #[must_use]
    pub fn is_border(&self, pos: Position) -> bool {
        self.contains(pos)
            && (pos.row() == 0
                || pos.col() == 0
                || pos.row() + 1 == self.rows
                || pos.col() + 1 == self.cols)
    }

    /// Returns a reference to the cell at `pos`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.contains(pos)
            .then(|| &self.cells[pos.row() * self.cols + pos.col()])
    }

    /// Returns a mutable reference to the cell at `pos`, or `None` if out of bounds.
    #[must_use]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if self.contains(pos) {
            Some(&mut self.cells[pos.row() * self.cols + pos.col()])
        } else {
            None
        }
    }

    /// Iterates over all positions in row-major order.
    ///
    /// The iterator does not borrow the grid.
    #[must_use]
    pub fn positions(&self) -> Positions {
        Positions {
            cols: self.cols,
            next: 0,
            end: self.rows * self.cols,
        }
    }

    /// Iterates over the in-bounds neighbours of `pos` as `(side, position)`
    /// pairs, in the order top, right, bottom, left.
    ///
    /// The iterator does not borrow the grid.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> Neighbors {
        Neighbors {
            rows: self.rows,
            cols: self.cols,
            center: pos,
            sides: Side::ALL.into_iter(),
        }
    }

    /// Iterates over the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Builds a grid of the same shape by applying `f` to every cell.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, pos: Position) -> &Self::Output {
        assert!(
            self.contains(pos),
            "position {pos} out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.cells[pos.row() * self.cols + pos.col()]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    #[track_caller]
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        assert!(
            self.contains(pos),
            "position {pos} out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &mut self.cells[pos.row() * self.cols + pos.col()]
    }
}

impl TileGrid {
    /// Returns `true` if every pair of adjacent tiles agrees on its shared edge.
    ///
    /// Every horizontal pair is checked with [`rules::horizontally_safe`] and
    /// every vertical pair with [`rules::vertically_safe`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeturn_core::TileGrid;
    ///
    /// let connected: TileGrid = "45 \n 00".parse()?;
    /// assert!(connected.is_safe());
    ///
    /// let dangling: TileGrid = "40 \n 00".parse()?;
    /// assert!(!dangling.is_safe());
    /// # Ok::<(), pipeturn_core::GridParseError>(())
    /// ```
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.first_violation().is_none()
    }

    /// Returns the first mismatching edge in row-major order, as the position
    /// of the left (or top) tile and the side of that tile facing the other.
    #[must_use]
    pub fn first_violation(&self) -> Option<(Position, Side)> {
        for pos in self.positions() {
            let tile = self[pos];
            let right = Position::new(pos.row(), pos.col() + 1);
            if let Some(&neighbor) = self.get(right)
                && !rules::horizontally_safe(tile, neighbor)
            {
                return Some((pos, Side::Right));
            }
            let below = Position::new(pos.row() + 1, pos.col());
            if let Some(&neighbor) = self.get(below)
                && !rules::vertically_safe(tile, neighbor)
            {
                return Some((pos, Side::Bottom));
            }
        }
        None
    }
}

impl Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                write!(f, "{}", self[Position::new(row, col)])?;
            }
        }
        Ok(())
    }
}

impl FromStr for TileGrid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (line_index, line) in s.lines().enumerate() {
            let mut row = Vec::new();
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                let value = ch
                    .to_digit(16)
                    .ok_or(GridParseError::InvalidChar {
                        line: line_index + 1,
                        ch,
                    })?;
                #[expect(clippy::cast_possible_truncation)]
                let tile = Tile::from_value(value as u8);
                row.push(tile);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        if rows.is_empty() {
            return Err(GridParseError::Empty);
        }
        Ok(Grid::from_rows(rows)?)
    }
}

/// Error returned by [`Grid::from_rows`] when rows differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("row {row} has {found} cells, expected {expected}")]
pub struct GridShapeError {
    /// Zero-based index of the offending row.
    pub row: usize,
    /// Length of the first row.
    pub expected: usize,
    /// Length of the offending row.
    pub found: usize,
}

/// Error returned when parsing a [`TileGrid`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GridParseError {
    /// The input contains no tiles.
    #[display("grid is empty")]
    Empty,
    /// A character is not a hexadecimal digit.
    #[display("invalid tile {ch:?} on line {line}")]
    InvalidChar {
        /// One-based line number.
        line: usize,
        /// The offending character.
        ch: char,
    },
    /// Rows differ in length.
    #[display("ragged grid: {_0}")]
    Shape(#[from] GridShapeError),
}

/// Row-major iterator over the positions of a grid.
#[derive(Debug, Clone)]
pub struct Positions {
    cols: usize,
    next: usize,
    end: usize,
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(Position::new(index / self.cols, index % self.cols))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.next;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Positions {}
impl FusedIterator for Positions {}

/// Iterator over the in-bounds neighbours of a position.
#[derive(Debug, Clone)]
pub struct Neighbors {
    rows: usize,
    cols: usize,
    center: Position,
    sides: std::array::IntoIter<Side, 4>,
}

impl Iterator for Neighbors {
    type Item = (Side, Position);

    fn next(&mut self) -> Option<Self::Item> {
        for side in self.sides.by_ref() {
            if let Some(pos) = self.center.neighbor(side)
                && pos.row() < self.rows
                && pos.col() < self.cols
            {
                return Some((side, pos));
            }
        }
        None
    }
}

impl FusedIterator for Neighbors {}
