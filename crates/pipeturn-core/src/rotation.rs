//! Quarter-turn rotations and sets of candidate rotations.
//!
//! [`Rotation`] names one of the four orientations a tile can be turned to,
//! and [`RotationSet`] is the rotation domain of a single unresolved cell,
//! stored as a 4-bit mask.
//!
//! # Examples
//!
//! ```
//! use pipeturn_core::{Rotation, RotationSet};
//!
//! let mut domain = RotationSet::FULL;
//! domain.remove(Rotation::R1);
//! domain.remove(Rotation::R3);
//!
//! assert_eq!(domain.len(), 2);
//! assert_eq!(domain.iter().collect::<Vec<_>>(), vec![Rotation::R0, Rotation::R2]);
//! ```

use std::{
    fmt::{self, Debug, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign},
};

/// A number of quarter turns in the range 0-3.
///
/// A rotation of `n` shifts a tile's opening mask left by `n` bits (see
/// [`Tile::rotate`](crate::Tile::rotate)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rotation {
    /// No rotation.
    R0 = 0,
    /// One quarter turn.
    R1 = 1,
    /// Half turn.
    R2 = 2,
    /// Three quarter turns.
    R3 = 3,
}

impl Rotation {
    /// All rotations in ascending order.
    pub const ALL: [Self; 4] = [Self::R0, Self::R1, Self::R2, Self::R3];

    /// Creates a rotation from any number of quarter turns, reduced modulo 4.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipeturn_core::Rotation;
    ///
    /// assert_eq!(Rotation::from_quarter_turns(1), Rotation::R1);
    /// assert_eq!(Rotation::from_quarter_turns(6), Rotation::R2);
    /// ```
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::R0,
            1 => Self::R1,
            2 => Self::R2,
            _ => Self::R3,
        }
    }

    /// Returns the number of quarter turns (0-3).
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Returns the rotation equivalent to applying `self` and then `other`.
    #[must_use]
    pub const fn then(self, other: Self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quarter_turns())
    }
}

/// The set of rotations still possible for one cell.
///
/// Bit `n` is set when [`Rotation`] `n` is a candidate. Copying a set is a
/// single byte copy, which keeps speculative branches in the search cheap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationSet {
    bits: u8,
}

impl RotationSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set of all four rotations.
    pub const FULL: Self = Self { bits: 0b1111 };
    /// Rotations that produce the two distinct orientations of a straight pipe.
    pub const HALF: Self = Self { bits: 0b0011 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set containing a single rotation.
    #[must_use]
    pub const fn from_elem(rotation: Rotation) -> Self {
        Self {
            bits: 1 << rotation.quarter_turns(),
        }
    }

    /// Returns the raw 4-bit mask.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Returns the number of rotations in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set holds no rotation.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if the rotation is in the set.
    #[must_use]
    pub const fn contains(self, rotation: Rotation) -> bool {
        self.bits & (1 << rotation.quarter_turns()) != 0
    }

    /// Adds a rotation, returning `true` if it was not already present.
    pub fn insert(&mut self, rotation: Rotation) -> bool {
        let before = self.bits;
        self.bits |= 1 << rotation.quarter_turns();
        before != self.bits
    }

    /// Removes a rotation, returning `true` if it was present.
    pub fn remove(&mut self, rotation: Rotation) -> bool {
        let before = self.bits;
        self.bits &= !(1 << rotation.quarter_turns());
        before != self.bits
    }

    /// Returns the only rotation of a singleton set.
    ///
    /// Returns `None` for empty sets and sets with two or more rotations.
    #[must_use]
    pub const fn as_single(self) -> Option<Rotation> {
        if self.bits.count_ones() != 1 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let turns = self.bits.trailing_zeros() as u8;
        Some(Rotation::from_quarter_turns(turns))
    }

    /// Returns the smallest rotation in the set.
    #[must_use]
    pub fn first(self) -> Option<Rotation> {
        self.iter().next()
    }

    /// Keeps only the rotations for which `keep` returns `true`.
    #[must_use]
    pub fn filter<F>(self, mut keep: F) -> Self
    where
        F: FnMut(Rotation) -> bool,
    {
        self.iter().filter(|&rotation| keep(rotation)).collect()
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Iterates over the rotations in ascending order.
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl Debug for RotationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(Rotation::quarter_turns)).finish()
    }
}

impl FromIterator<Rotation> for RotationSet {
    fn from_iter<T: IntoIterator<Item = Rotation>>(iter: T) -> Self {
        let mut set = Self::new();
        for rotation in iter {
            set.insert(rotation);
        }
        set
    }
}

impl IntoIterator for RotationSet {
    type Item = Rotation;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitOr for RotationSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitOrAssign for RotationSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for RotationSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitAndAssign for RotationSet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

/// Ascending iterator over a [`RotationSet`].
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u8,
}

impl Iterator for Iter {
    type Item = Rotation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let turns = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(Rotation::from_quarter_turns(turns))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}
impl FusedIterator for Iter {}
