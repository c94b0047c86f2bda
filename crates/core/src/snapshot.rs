use crate::pieces::{get_shape, Minos, Tetromino};
use crate::types::{Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH, INITIAL_TICKS_PER_DROP};

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Field coordinates of the filled cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let minos: Minos = get_shape(self.kind).minos(self.rotation);
        minos.into_iter().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only copy of everything a frame shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub field: [[Cell; WIDTH]; HEIGHT],
    /// Falling piece; absent while lines are marked and after game over
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub ticks_per_drop: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }

    /// Field as characters with the falling piece drawn over it
    pub fn char_rows(&self) -> [[char; WIDTH]; HEIGHT] {
        let mut out = [[' '; WIDTH]; HEIGHT];
        for (y, row) in self.field.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                out[y][x] = cell.glyph();
            }
        }
        if let Some(active) = self.active {
            for (x, y) in active.cells() {
                if (0..WIDTH as i8).contains(&x) && (0..HEIGHT as i8).contains(&y) {
                    out[y as usize][x as usize] = active.kind.letter();
                }
            }
        }
        out
    }

    /// `char_rows` joined into newline-separated text
    pub fn to_text(&self) -> String {
        let rows = self.char_rows();
        let mut s = String::with_capacity((WIDTH + 1) * HEIGHT);
        for row in rows.iter() {
            s.extend(row.iter());
            s.push('\n');
        }
        s
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            field: [[Cell::Empty; WIDTH]; HEIGHT],
            active: None,
            score: 0,
            lines: 0,
            level: 0,
            ticks_per_drop: INITIAL_TICKS_PER_DROP,
            game_over: false,
        }
    }
}
