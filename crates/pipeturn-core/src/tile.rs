//! Pipe tiles and the sides they open onto.
//!
//! A [`Tile`] is a 4-bit mask with one bit per side:
//!
//! | bit | side   |
//! |-----|--------|
//! | 3   | top    |
//! | 2   | right  |
//! | 1   | bottom |
//! | 0   | left   |
//!
//! # Examples
//!
//! ```
//! use pipeturn_core::{Rotation, Side, Tile};
//!
//! let elbow = Tile::TOP | Tile::RIGHT;
//! assert!(elbow.is_open(Side::Right));
//!
//! // A quarter turn moves every opening one side further along.
//! assert_eq!(elbow.rotate(Rotation::R1), Tile::TOP | Tile::LEFT);
//! ```

use std::fmt::{self, Display};

use crate::{Rotation, RotationSet};

bitflags::bitflags! {
    /// The open sides of a single pipe tile.
    ///
    /// Values `0` ([`Tile::WALL`]) and `15` ([`Tile::CROSS`]) look the same
    /// under every rotation; the two straight pipes only have two distinct
    /// orientations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Tile: u8 {
        /// Opening on the top side.
        const TOP = 0b1000;
        /// Opening on the right side.
        const RIGHT = 0b0100;
        /// Opening on the bottom side.
        const BOTTOM = 0b0010;
        /// Opening on the left side.
        const LEFT = 0b0001;
    }
}

/// `ROTATED[value][turns]` is `value` circularly shifted left by `turns` bits.
const ROTATED: [[u8; 4]; 16] = {
    let mut table = [[0; 4]; 16];
    let mut value = 0;
    while value < 16 {
        let mut turns = 0;
        while turns < 4 {
            #[expect(clippy::cast_possible_truncation)]
            let rotated = (((value << turns) | (value >> (4 - turns))) & 0b1111) as u8;
            table[value][turns] = rotated;
            turns += 1;
        }
        value += 1;
    }
    table
};

impl Tile {
    /// A tile with no openings. Used for the outer wall.
    pub const WALL: Self = Self::empty();
    /// A tile open on all four sides.
    pub const CROSS: Self = Self::all();
    /// A straight pipe running left to right.
    pub const STRAIGHT_HORIZONTAL: Self = Self::LEFT.union(Self::RIGHT);
    /// A straight pipe running top to bottom.
    pub const STRAIGHT_VERTICAL: Self = Self::TOP.union(Self::BOTTOM);
    /// The entrance cell on the left border, open towards the grid only.
    pub const ENTRANCE: Self = Self::RIGHT;
    /// The exit cell on the right border, open towards the grid only.
    pub const EXIT: Self = Self::LEFT;

    /// Creates a tile from its 4-bit value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is greater than 15.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeturn_core::Tile;
    ///
    /// assert_eq!(Tile::from_value(0b0101), Tile::STRAIGHT_HORIZONTAL);
    /// ```
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        Self::try_from(value).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Returns the 4-bit value of the tile.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.bits()
    }

    /// Returns `true` if the tile is open on `side`.
    #[must_use]
    pub const fn is_open(self, side: Side) -> bool {
        self.contains(side.flag())
    }

    /// Rotates the tile by circularly shifting its mask left.
    ///
    /// `R0` is the identity, and rotations compose:
    /// `t.rotate(a).rotate(b) == t.rotate(a.then(b))`.
    #[must_use]
    pub const fn rotate(self, rotation: Rotation) -> Self {
        Self::from_bits_retain(ROTATED[self.bits() as usize][rotation.quarter_turns() as usize])
    }

    /// Returns the rotations that yield pairwise different orientations.
    ///
    /// This is the initial rotation domain of an unresolved cell: `{0}` for
    /// walls and crosses, `{0, 1}` for straight pipes, and all four rotations
    /// otherwise.
    #[must_use]
    pub const fn distinct_rotations(self) -> RotationSet {
        match self.bits() {
            0b0000 | 0b1111 => RotationSet::from_elem(Rotation::R0),
            0b0101 | 0b1010 => RotationSet::HALF,
            _ => RotationSet::FULL,
        }
    }

    /// Returns the tile as a single lowercase hexadecimal digit.
    #[must_use]
    pub fn to_hex_char(self) -> char {
        char::from_digit(u32::from(self.bits()), 16).unwrap_or('?')
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_char())
    }
}

/// Error returned when converting a value above 15 into a [`Tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tile value must be between 0 and 15, got {value}")]
pub struct TileValueError {
    /// The rejected value.
    pub value: u8,
}

impl TryFrom<u8> for Tile {
    type Error = TileValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bits(value).ok_or(TileValueError { value })
    }
}

/// One of the four sides of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    /// The top side.
    Top,
    /// The right side.
    Right,
    /// The bottom side.
    Bottom,
    /// The left side.
    Left,
}

impl Side {
    /// All sides, clockwise from the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Returns the side facing this one across a shared edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns the tile flag for this side.
    #[must_use]
    pub const fn flag(self) -> Tile {
        match self {
            Self::Top => Tile::TOP,
            Self::Right => Tile::RIGHT,
            Self::Bottom => Tile::BOTTOM,
            Self::Left => Tile::LEFT,
        }
    }
}
