//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb, ScreenCell};
use crate::types::{Cell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

const BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left terminal position of the field for `viewport`
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let field_w = FIELD_WIDTH as u16 * self.cell_w;
        let field_h = FIELD_HEIGHT as u16 * self.cell_h;
        let x = viewport.width.saturating_sub(field_w + PANEL_WIDTH) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(field_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), BG).glyph(' '));

        let (start_x, start_y) = self.origin(viewport);

        // The field carries its own walls, so there is no separate border.
        for (y, row) in snap.field.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.fill_cell(fb, start_x, start_y, x as u16, y as u16, cell_glyph(*cell));
            }
        }

        if let Some(active) = snap.active {
            let glyph = cell_glyph(Cell::Block(active.kind));
            for (x, y) in active.cells() {
                if (0..FIELD_WIDTH as i8).contains(&x) && (0..FIELD_HEIGHT as i8).contains(&y) {
                    self.fill_cell(fb, start_x, start_y, x as u16, y as u16, glyph);
                }
            }
        }

        let field_w = FIELD_WIDTH as u16 * self.cell_w;
        self.draw_side_panel(fb, snap, start_x + field_w + 2, start_y);

        if snap.game_over {
            let field_h = FIELD_HEIGHT as u16 * self.cell_h;
            self.draw_overlay_text(fb, start_x, start_y, field_w, field_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        glyph: ScreenCell,
    ) {
        let px = start_x + cell_x * self.cell_w;
        let py = start_y + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, glyph.ch, glyph.style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, panel_x: u16, start_y: u16) {
        if panel_x >= fb.width() {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BG);

        let mut y = start_y;
        for (name, n) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Columns reserved right of the field for the score panel
const PANEL_WIDTH: u16 = 12;

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// How one field cell looks on screen
pub fn cell_glyph(cell: Cell) -> ScreenCell {
    match cell {
        Cell::Empty => CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).glyph(' '),
        Cell::Wall => CellStyle::new(Rgb::new(150, 150, 160), Rgb::new(60, 60, 70)).glyph('#'),
        Cell::Block(kind) => CellStyle::new(piece_color(kind), WELL_BG).bold().glyph('█'),
        Cell::Clearing => CellStyle::new(Rgb::new(255, 255, 255), WELL_BG).bold().glyph('='),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_centres_field_and_panel() {
        let view = GameView::default();
        assert_eq!(view.origin(Viewport::new(80, 24)), (22, 3));
        assert_eq!(view.origin(Viewport::new(10, 5)), (0, 0));
        let top = view.with_anchor_y(AnchorY::Top);
        assert_eq!(top.origin(Viewport::new(80, 24)), (22, 0));
    }

    #[test]
    fn cell_glyphs() {
        assert_eq!(cell_glyph(Cell::Wall).ch, '#');
        assert_eq!(cell_glyph(Cell::Clearing).ch, '=');
        assert_eq!(cell_glyph(Cell::Empty).ch, ' ');
        assert_ne!(
            cell_glyph(Cell::Block(PieceKind::I)).style.fg,
            cell_glyph(Cell::Block(PieceKind::Z)).style.fg
        );
    }
}
