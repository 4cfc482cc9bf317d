//! Edge compatibility between neighbouring tiles.
//!
//! Two tiles sharing an edge are compatible when both are open on that edge
//! or both are closed on it. The predicates are served from 16x16 lookup
//! tables built at compile time.

use crate::{Side, Tile};

const fn build_table(first_side: Side, second_side: Side) -> [[bool; 16]; 16] {
    let mut table = [[false; 16]; 16];
    let mut first = 0;
    while first < 16 {
        let mut second = 0;
        while second < 16 {
            #[expect(clippy::cast_possible_truncation)]
            let (a, b) = (
                Tile::from_bits_retain(first as u8),
                Tile::from_bits_retain(second as u8),
            );
            table[first][second] = a.is_open(first_side) == b.is_open(second_side);
            second += 1;
        }
        first += 1;
    }
    table
}

const HORIZONTAL: [[bool; 16]; 16] = build_table(Side::Right, Side::Left);
const VERTICAL: [[bool; 16]; 16] = build_table(Side::Bottom, Side::Top);

/// Returns `true` if `left` and `right`, placed side by side, agree on their
/// shared edge: the right opening of `left` equals the left opening of `right`.
///
/// # Examples
///
/// ```
/// use pipeturn_core::{Tile, rules};
///
/// assert!(rules::horizontally_safe(Tile::ENTRANCE, Tile::STRAIGHT_HORIZONTAL));
/// assert!(rules::horizontally_safe(Tile::WALL, Tile::STRAIGHT_VERTICAL));
/// assert!(!rules::horizontally_safe(Tile::ENTRANCE, Tile::STRAIGHT_VERTICAL));
/// ```
#[must_use]
pub const fn horizontally_safe(left: Tile, right: Tile) -> bool {
    HORIZONTAL[left.bits() as usize][right.bits() as usize]
}

/// Returns `true` if `top` placed above `bottom` agree on their shared edge:
/// the bottom opening of `top` equals the top opening of `bottom`.
#[must_use]
pub const fn vertically_safe(top: Tile, bottom: Tile) -> bool {
    VERTICAL[top.bits() as usize][bottom.bits() as usize]
}

/// Returns `true` if `tile` agrees with `neighbor`, which lies across `side`
/// of `tile`.
///
/// Dispatches to [`horizontally_safe`] or [`vertically_safe`] with the
/// arguments in left/right or top/bottom order.
#[must_use]
pub const fn compatible(tile: Tile, side: Side, neighbor: Tile) -> bool {
    match side {
        Side::Top => vertically_safe(neighbor, tile),
        Side::Right => horizontally_safe(tile, neighbor),
        Side::Bottom => vertically_safe(tile, neighbor),
        Side::Left => horizontally_safe(neighbor, tile),
    }
}
