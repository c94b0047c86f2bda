//! Pieces module - tetromino layouts and the falling piece
//!
//! Layouts follow the Super Rotation System spawn orientations, stored as
//! flattened character squares (`' '` marks an empty cell).
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;

use crate::rotation::cell_index;
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to the bounding box's top-left corner
pub type MinoOffset = (i8, i8);

/// Filled cells of a piece at one rotation
pub type Minos = ArrayVec<MinoOffset, 4>;

/// Canonical (0°) layout of one tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: PieceKind,
    /// Bounding box side length (2, 3 or 4)
    pub side: u8,
    layout: &'static [u8],
}

const SHAPES: [Shape; 7] = [
    Shape {
        kind: PieceKind::I,
        side: 4,
        layout: b"    IIII        ",
    },
    Shape {
        kind: PieceKind::Z,
        side: 3,
        layout: b"ZZ  ZZ   ",
    },
    Shape {
        kind: PieceKind::S,
        side: 3,
        layout: b" SSSS    ",
    },
    Shape {
        kind: PieceKind::O,
        side: 2,
        layout: b"OOOO",
    },
    Shape {
        kind: PieceKind::T,
        side: 3,
        layout: b" T TTT   ",
    },
    Shape {
        kind: PieceKind::L,
        side: 3,
        layout: b"  LLLL   ",
    },
    Shape {
        kind: PieceKind::J,
        side: 3,
        layout: b"J  JJJ   ",
    },
];

/// Get the canonical shape for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

impl Shape {
    /// Whether local cell `(x, y)` is filled when viewed at `rotation`
    #[inline]
    pub fn is_filled(&self, x: usize, y: usize, rotation: Rotation) -> bool {
        let side = self.side as usize;
        self.layout[cell_index(x, y, rotation, side)] != b' '
    }

    /// Filled cells at `rotation`, in reading order
    pub fn minos(&self, rotation: Rotation) -> Minos {
        let side = self.side as usize;
        let mut out = Minos::new();
        for y in 0..side {
            for x in 0..side {
                if self.is_filled(x, y, rotation) {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Field column of the bounding box's left edge
    pub x: i8,
    /// Field row of the bounding box's top edge
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn pose
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Reuse this piece for the next kind, back at the spawn pose
    pub fn reset(&mut self, kind: PieceKind) {
        *self = Self::spawn(kind);
    }

    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind)
    }

    /// Bounding box side length
    pub fn side(&self) -> u8 {
        self.shape().side
    }

    /// Layout cell at local `(x, y)` under the current rotation
    ///
    /// Returns the piece kind for filled cells and `None` for empty ones.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.shape()
            .is_filled(x, y, self.rotation)
            .then_some(self.kind)
    }

    /// Filled cells under the current rotation, relative to `(x, y)`
    pub fn minos(&self) -> Minos {
        self.shape().minos(self.rotation)
    }

    /// Same piece at another pose
    pub fn with_pose(&self, x: i8, y: i8, rotation: Rotation) -> Self {
        Self {
            x,
            y,
            rotation,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_lengths() {
        assert_eq!(get_shape(PieceKind::I).side, 4);
        assert_eq!(get_shape(PieceKind::O).side, 2);
        for kind in [PieceKind::Z, PieceKind::S, PieceKind::T, PieceKind::L, PieceKind::J] {
            assert_eq!(get_shape(kind).side, 3);
        }
    }

    #[test]
    fn test_every_shape_has_four_minos_in_every_rotation() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                assert_eq!(get_shape(kind).minos(rotation).len(), 4, "{kind:?} {rotation:?}");
            }
        }
    }

    #[test]
    fn test_layout_letters_match_kind() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            assert_eq!(shape.layout.len(), (shape.side as usize).pow(2));
            assert!(shape
                .layout
                .iter()
                .all(|&b| b == b' ' || b as char == kind.letter()));
        }
    }

    #[test]
    fn test_t_piece_rotations() {
        let t = get_shape(PieceKind::T);
        assert_eq!(t.minos(Rotation::North).as_slice(), &[(1, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(t.minos(Rotation::East).as_slice(), &[(1, 0), (1, 1), (2, 1), (1, 2)]);
        assert_eq!(t.minos(Rotation::South).as_slice(), &[(0, 1), (1, 1), (2, 1), (1, 2)]);
        assert_eq!(t.minos(Rotation::West).as_slice(), &[(1, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_i_piece_rotations() {
        let i = get_shape(PieceKind::I);
        assert_eq!(i.minos(Rotation::North).as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
        assert_eq!(i.minos(Rotation::East).as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(i.minos(Rotation::South).as_slice(), &[(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(i.minos(Rotation::West).as_slice(), &[(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let o = get_shape(PieceKind::O);
        let north = o.minos(Rotation::North);
        for rotation in Rotation::ALL {
            assert_eq!(o.minos(rotation), north);
        }
    }

    #[test]
    fn test_spawn_and_reset() {
        let mut piece = Tetromino::spawn(PieceKind::L);
        assert_eq!((piece.x, piece.y), (4, 1));
        assert_eq!(piece.rotation, Rotation::North);

        piece.x = 7;
        piece.y = 9;
        piece.rotation = Rotation::South;
        piece.reset(PieceKind::I);
        assert_eq!(piece, Tetromino::spawn(PieceKind::I));
        assert_eq!(piece.side(), 4);
    }

    #[test]
    fn test_cell_at_follows_rotation() {
        let mut piece = Tetromino::spawn(PieceKind::J);
        assert_eq!(piece.cell_at(0, 0), Some(PieceKind::J));
        assert_eq!(piece.cell_at(2, 0), None);

        piece.rotation = Rotation::East;
        assert_eq!(piece.cell_at(0, 0), None);
        assert_eq!(piece.cell_at(2, 0), Some(PieceKind::J));
    }
}
