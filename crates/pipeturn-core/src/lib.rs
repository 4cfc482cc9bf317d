//! Core data structures for rotational pipe puzzles.
//!
//! A puzzle is a rectangular grid of tiles, each a 4-bit mask of open sides.
//! Only the rotation of each tile is unknown; a solution turns every tile so
//! that all neighbouring tiles agree on their shared edges.
//!
//! # Overview
//!
//! - [`tile`]: [`Tile`] opening masks, [`Side`], and tile rotation
//! - [`rotation`]: [`Rotation`] quarter turns and the [`RotationSet`] domain bitmask
//! - [`position`]: [`Position`] cell coordinates
//! - [`grid`]: the generic [`Grid`] container, [`TileGrid`], and its
//!   consistency check ([`TileGrid::is_safe`])
//! - [`rules`]: pairwise edge compatibility predicates
//!
//! # Examples
//!
//! ```
//! use pipeturn_core::{Position, Rotation, Tile, TileGrid};
//!
//! let mut grid: TileGrid = "
//!     42
//!     00
//! "
//! .parse()?;
//! assert!(!grid.is_safe());
//!
//! // Turn the dead end so that it opens towards its left neighbour.
//! let pos = Position::new(0, 1);
//! grid[pos] = grid[pos].rotate(Rotation::R3);
//! assert_eq!(grid[pos], Tile::LEFT);
//! assert!(grid.is_safe());
//! # Ok::<(), pipeturn_core::GridParseError>(())
//! ```

pub mod grid;
pub mod position;
pub mod rotation;
pub mod rules;
pub mod tile;

pub use self::{
    grid::{Grid, GridParseError, GridShapeError, TileGrid},
    position::Position,
    rotation::{Rotation, RotationSet},
    tile::{Side, Tile, TileValueError},
};
