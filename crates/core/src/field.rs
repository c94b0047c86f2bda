//! Field module - manages the game grid
//!
//! The field is a 12x18 grid that carries its own boundary: columns 0 and 11
//! and row 17 are permanent walls. Uses a flat array for better cache locality
//! and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..17 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, FIELD_HEIGHT, FIELD_WIDTH, MAX_LINES_PER_LOCK};

/// Total number of cells on the field
const FIELD_SIZE: usize = (FIELD_WIDTH as usize) * (FIELD_HEIGHT as usize);

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Row indices completed by a single lock, top to bottom
pub type FullLines = ArrayVec<u8, MAX_LINES_PER_LOCK>;

/// The playfield - 12 columns x 18 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a field with walls on both sides and the floor, empty elsewhere
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; FIELD_SIZE];
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if Self::is_wall(x, y) {
                    cells[y * WIDTH + x] = Cell::Wall;
                }
            }
        }
        Self { cells }
    }

    #[inline(always)]
    fn is_wall(x: usize, y: usize) -> bool {
        x == 0 || x == WIDTH - 1 || y == HEIGHT - 1
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set an interior cell
    /// Returns false for out-of-bounds and wall positions, which never change
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) if !Self::is_wall(x as usize, y as usize) => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// True for walls, locked blocks and lines pending a clear
    ///
    /// Anything outside the grid counts as occupied.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.get(x, y).map_or(true, Cell::is_occupied)
    }

    /// Copy every filled cell of `piece` into the field
    ///
    /// The pose must already have passed the fit check; this does not validate.
    pub fn lock_piece(&mut self, piece: &Tetromino) {
        let cell = Cell::Block(piece.kind);
        for (dx, dy) in piece.minos() {
            let placed = self.set(piece.x + dx, piece.y + dy, cell);
            debug_assert!(placed, "locked {:?} outside the playable area", piece);
        }
    }

    /// Check if every interior cell of row `y` is occupied
    ///
    /// The floor row is never considered.
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT - 1 {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start + 1..start + WIDTH - 1]
            .iter()
            .all(|cell| cell.is_occupied())
    }

    /// Full rows among the `side` rows starting at `start_y`, top to bottom
    ///
    /// Only the rows a just-locked piece could have completed are scanned.
    pub fn full_lines(&self, start_y: i8, side: u8) -> FullLines {
        let mut rows = FullLines::new();
        for dy in 0..side as i8 {
            let y = start_y + dy;
            if y >= FIELD_HEIGHT as i8 - 1 {
                break;
            }
            if y >= 0 && self.is_row_full(y as usize) {
                debug_assert!(
                    !rows.is_full(),
                    "more than {MAX_LINES_PER_LOCK} full rows from one lock"
                );
                // Unreachable for side <= 4; release builds keep the first four.
                let _ = rows.try_push(y as u8);
            }
        }
        rows
    }

    /// Overwrite the interior of each row with the pending-clear marker
    pub fn mark_lines(&mut self, rows: &[u8]) {
        for &y in rows {
            let start = y as usize * WIDTH;
            self.cells[start + 1..start + WIDTH - 1].fill(Cell::Clearing);
        }
    }

    /// Remove `rows` and let everything above fall into the gap
    ///
    /// Contiguous runs are collapsed one at a time from the bottom up, so the
    /// indices of the runs still waiting stay valid once adjusted by the
    /// number of rows already removed beneath them.
    pub fn collapse(&mut self, rows: &[u8]) {
        let mut sorted: FullLines = rows.iter().copied().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut removed = 0usize;
        let mut i = 0usize;
        while i < sorted.len() {
            let mut run = 1usize;
            while i + run < sorted.len() && sorted[i + run] as usize + run == sorted[i] as usize {
                run += 1;
            }
            let bottom = sorted[i] as usize + removed;
            self.drop_rows_onto(bottom, run);
            removed += run;
            i += run;
        }
    }

    /// Shift every row above the run ending at `bottom` down by `run` rows
    fn drop_rows_onto(&mut self, bottom: usize, run: usize) {
        for y in (run..=bottom).rev() {
            let src_start = (y - run) * WIDTH;
            let dst_start = y * WIDTH;
            // copy_within handles overlapping ranges safely
            self.cells
                .copy_within(src_start..src_start + WIDTH, dst_start);
        }
        for y in 0..run.min(bottom + 1) {
            self.blank_row(y);
        }
    }

    fn blank_row(&mut self, y: usize) {
        let start = y * WIDTH;
        self.cells[start + 1..start + WIDTH - 1].fill(Cell::Empty);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, walls included
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Copy the field into a 2D grid (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Build a field from text rows, for tests and fixtures
    ///
    /// Each row lists the interior columns 1..=10 using `Cell` glyphs
    /// (`' '`, `'='`, or a piece letter; anything else is a block of `I`).
    /// Rows are bottom-aligned above the floor.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::PieceKind;

        let mut field = Self::new();
        let top = HEIGHT - 1 - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (dx, ch) in row.chars().enumerate() {
                let cell = match ch {
                    ' ' => Cell::Empty,
                    '=' => Cell::Clearing,
                    c => Cell::Block(PieceKind::from_letter(c).unwrap_or(PieceKind::I)),
                };
                field.set(dx as i8 + 1, (top + i) as i8, cell);
            }
        }
        field
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
