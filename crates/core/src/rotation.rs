//! Rotation geometry - maps rotated local cells back to the canonical layout
//!
//! Shapes are stored once, in their spawn orientation, as a flattened square of
//! side 2, 3 or 4. Rotating a piece never rewrites its layout: instead, each
//! local `(x, y)` of the rotated view is translated to the flattened index of
//! the same physical cell in the canonical layout.
//!
//! The tables below list, for each rotation state, the canonical index seen at
//! every `(row, col)` of the view after turning the box 90° clockwise that many
//! times. The 2x2 box (O piece) is rotation-invariant and skips the tables.

use crate::types::Rotation;

/// Lookup for 3x3 bounding boxes, indexed `[rotation][y][x]`
pub const THREE_ROT: [[[u8; 3]; 3]; 4] = [
    // 0 degrees
    [[0, 1, 2], [3, 4, 5], [6, 7, 8]],
    // 90 degrees
    [[6, 3, 0], [7, 4, 1], [8, 5, 2]],
    // 180 degrees
    [[8, 7, 6], [5, 4, 3], [2, 1, 0]],
    // 270 degrees
    [[2, 5, 8], [1, 4, 7], [0, 3, 6]],
];

/// Lookup for 4x4 bounding boxes, indexed `[rotation][y][x]`
pub const FOUR_ROT: [[[u8; 4]; 4]; 4] = [
    // 0 degrees
    [[0, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11], [12, 13, 14, 15]],
    // 90 degrees
    [[12, 8, 4, 0], [13, 9, 5, 1], [14, 10, 6, 2], [15, 11, 7, 3]],
    // 180 degrees
    [[15, 14, 13, 12], [11, 10, 9, 8], [7, 6, 5, 4], [3, 2, 1, 0]],
    // 270 degrees
    [[3, 7, 11, 15], [2, 6, 10, 14], [1, 5, 9, 13], [0, 4, 8, 12]],
];

/// Flattened canonical index for local cell `(x, y)` viewed at `rotation`.
///
/// # Panics
///
/// Panics if `side` is larger than 4 or `(x, y)` lies outside the box. Both are
/// fixed by the piece definitions and never come from player input.
#[inline]
pub fn cell_index(x: usize, y: usize, rotation: Rotation, side: usize) -> usize {
    assert!(x < side && y < side, "local cell ({x}, {y}) outside {side}x{side} box");
    let r = rotation.index();
    match side {
        0..=2 => y * side + x,
        3 => THREE_ROT[r][y][x] as usize,
        4 => FOUR_ROT[r][y][x] as usize,
        _ => panic!("no rotation table for side length {side}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rotation: Rotation, side: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                out.push(cell_index(x, y, rotation, side));
            }
        }
        out
    }

    #[test]
    fn test_north_is_identity() {
        for side in 2..=4 {
            let expected: Vec<usize> = (0..side * side).collect();
            assert_eq!(view(Rotation::North, side), expected);
        }
    }

    #[test]
    fn test_two_by_two_ignores_rotation() {
        for rotation in Rotation::ALL {
            assert_eq!(view(rotation, 2), vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_tables_match_clockwise_turns() {
        // Turning a box clockwise puts old[n-1-c][r] at new[r][c].
        for side in 3..=4 {
            for rotation in Rotation::ALL {
                let mut grid: Vec<usize> = (0..side * side).collect();
                for _ in 0..rotation.index() {
                    let prev = grid.clone();
                    for r in 0..side {
                        for c in 0..side {
                            grid[r * side + c] = prev[(side - 1 - c) * side + r];
                        }
                    }
                }
                assert_eq!(view(rotation, side), grid, "side {side} {rotation:?}");
            }
        }
    }

    #[test]
    fn test_three_by_three_center_is_fixed() {
        for rotation in Rotation::ALL {
            assert_eq!(cell_index(1, 1, rotation, 3), 4);
        }
    }

    #[test]
    #[should_panic]
    fn test_out_of_box_panics() {
        cell_index(3, 0, Rotation::East, 3);
    }
}
