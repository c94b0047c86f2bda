//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Field Dimensions
//!
//! The playfield is a 12x18 character grid that includes its own walls:
//!
//! - **Width**: 12 columns (0 and 11 are walls, 1-10 are playable)
//! - **Height**: 18 rows (row 17 is the floor, 0-16 are playable)
//! - **Spawn position**: (4, 1), top-left of the piece bounding box
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_US` | 16667 | Fixed tick period (~60 ticks per second) |
//! | `INITIAL_TICKS_PER_DROP` | 48 | Ticks between automatic drops at level 0 |
//! | `LINE_CLEAR_PAUSE_MS` | 600 | Visible pause between marking and collapsing lines |
//!
//! # Drop Speed Schedule
//!
//! Each level-up shortens the drop threshold by 5 ticks while the level is
//! below 8 (and the threshold above 5), and by 1 tick afterwards. The
//! threshold never goes below 1.
//!
//! # Examples
//!
//! ```
//! use tty_tetris_types::{Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! // Identities have stable indices in I, Z, S, O, T, L, J order.
//! assert_eq!(PieceKind::O.index(), 3);
//! assert_eq!(PieceKind::from_index(6), Some(PieceKind::J));
//!
//! // Rotate
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
//!
//! // Cells render as single characters.
//! assert_eq!(Cell::Wall.glyph(), '#');
//! assert_eq!(Cell::Block(PieceKind::T).glyph(), 'T');
//!
//! assert_eq!(PieceKind::from_letter('t'), Some(PieceKind::T));
//! assert_eq!(FIELD_WIDTH, 12);
//! assert_eq!(FIELD_HEIGHT, 18);
//! ```

/// Field width in cells, including both wall columns (12 columns)
pub const FIELD_WIDTH: u8 = 12;

/// Field height in cells, including the floor row (18 rows)
pub const FIELD_HEIGHT: u8 = 18;

/// Spawn column for the top-left corner of a new piece's bounding box
pub const SPAWN_X: i8 = 4;

/// Spawn row for the top-left corner of a new piece's bounding box
pub const SPAWN_Y: i8 = 1;

/// Fixed tick period in microseconds (16667us ≈ 60 ticks per second)
pub const TICK_US: u64 = 16_667;

/// Ticks between automatic drops at level 0
pub const INITIAL_TICKS_PER_DROP: u32 = 48;

/// Drop threshold floor
pub const MIN_TICKS_PER_DROP: u32 = 1;

/// Levels below this shorten the drop threshold in large steps
pub const FAST_SPEEDUP_LEVELS: u32 = 8;

/// Large drop threshold step (early levels)
pub const FAST_SPEEDUP_TICKS: u32 = 5;

/// Pause between marking full lines and collapsing them (600ms)
pub const LINE_CLEAR_PAUSE_MS: u64 = 600;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Most lines a single lock can complete (the I piece spans 4 rows)
pub const MAX_LINES_PER_LOCK: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_timing_defaults() {
        assert_eq!(INITIAL_TICKS_PER_DROP, 48);
        assert_eq!(LINE_CLEAR_PAUSE_MS, 600);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(LINE_SCORES[4], 1200);
    }

    #[test]
    fn piece_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn letter_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
            assert_eq!(PieceKind::from_letter(kind.letter().to_ascii_lowercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_letter('#'), None);
        assert_eq!(PieceKind::from_letter('='), None);
    }

    #[test]
    fn rotation_cycles() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::from_index(4), None);
    }

    #[test]
    fn cell_occupancy() {
        assert!(!Cell::Empty.is_occupied());
        assert!(Cell::Wall.is_occupied());
        assert!(Cell::Clearing.is_occupied());
        assert!(Cell::Block(PieceKind::I).is_occupied());
    }
}

/// The seven tetromino piece kinds
///
/// Discriminants are the identity indices used by the piece bag:
/// I=0, Z=1, S=2, O=3, T=4, L=5, J=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    Z,
    S,
    O,
    T,
    L,
    J,
}

impl PieceKind {
    /// All kinds in identity order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Identity index (0..7)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a kind by identity index
    ///
    /// # Examples
    ///
    /// ```
    /// use tty_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(9), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }


    /// Upper-case letter used when the piece is drawn as text
    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }

    /// Inverse of [`letter`](Self::letter), ignoring case
    pub fn from_letter(ch: char) -> Option<Self> {
        let upper = ch.to_ascii_uppercase();
        Self::ALL.into_iter().find(|kind| kind.letter() == upper)
    }
}

/// Rotation states, successive 90° clockwise turns of the bounding box
///
/// - **North**: Spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation state index (0..4)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tty_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Player intents the step function understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Force an immediate downward step (resets the drop timer)
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}

/// A cell on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Permanent boundary (side columns and floor)
    Wall,
    /// Locked piece content
    Block(PieceKind),
    /// Part of a completed line waiting to be collapsed
    Clearing,
}

impl Cell {
    /// Anything but `Empty` blocks a piece
    pub fn is_occupied(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// Character used by the plain-text grid
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::Block(kind) => kind.letter(),
            Cell::Clearing => '=',
        }
    }
}
