//! Cell coordinates.

use std::fmt::{self, Display};

use crate::Side;

/// A cell coordinate, counted from the top-left corner of a grid.
///
/// Positions order row-major, which is also the iteration order of
/// [`Grid::positions`](crate::Grid::positions).
///
/// # Examples
///
/// ```
/// use pipeturn_core::{Position, Side};
///
/// let pos = Position::new(1, 0);
/// assert_eq!(pos.neighbor(Side::Right), Some(Position::new(1, 1)));
/// assert_eq!(pos.neighbor(Side::Left), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the row index.
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column index.
    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the adjacent position across `side`.
    ///
    /// Returns `None` when stepping above row 0 or left of column 0. The
    /// caller is responsible for checking the bottom and right bounds.
    #[must_use]
    pub const fn neighbor(self, side: Side) -> Option<Self> {
        match side {
            Side::Top => match self.row.checked_sub(1) {
                Some(row) => Some(Self::new(row, self.col)),
                None => None,
            },
            Side::Right => Some(Self::new(self.row, self.col + 1)),
            Side::Bottom => Some(Self::new(self.row + 1, self.col)),
            Side::Left => match self.col.checked_sub(1) {
                Some(col) => Some(Self::new(self.row, col)),
                None => None,
            },
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
