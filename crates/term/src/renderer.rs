//! TerminalRenderer: writes framebuffers to the real terminal.
//!
//! Each frame is compared with the one already on screen, row by row. Only
//! the span between the first and the last changed cell of a row is
//! rewritten; a tick usually touches a handful of field rows and the HUD.
//! The first frame, and any frame whose size differs from the last one,
//! repaints every row.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Attributes, Color, ContentStyle, PrintStyledContent, ResetColor, StyledContent,
};
use crossterm::terminal::{
    self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, QueueableCommand};
use log::debug;

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
    /// Reused buffer for one styled span
    span: String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
            span: String::with_capacity(64),
        }
    }

    /// Switch to raw mode and the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.bytes.clear();
        queue!(self.bytes, EnterAlternateScreen, Hide, DisableLineWrap)?;
        self.flush()?;
        self.shown = None;
        debug!("terminal entered raw mode");
        Ok(())
    }

    /// Undo everything `enter` did
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(self.bytes, ResetColor, EnableLineWrap, Show, LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        debug!("terminal restored");
        Ok(())
    }

    /// Show `fb`, then swap it with the previous frame's buffer.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; after the
    /// call it holds stale content that the next render overwrites.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let shown = self
            .shown
            .as_ref()
            .filter(|s| s.width() == fb.width() && s.height() == fb.height());

        self.bytes.clear();
        if shown.is_none() {
            self.bytes.queue(Clear(ClearType::All))?;
        }
        encode_frame(shown, fb, &mut self.bytes, &mut self.span)?;
        self.flush()?;

        match self.shown.as_mut() {
            Some(prev) => std::mem::swap(prev, fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.bytes.is_empty() {
            return Ok(());
        }
        self.stdout
            .write_all(&self.bytes)
            .and_then(|_| self.stdout.flush())
            .context("writing to the terminal")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Columns of row `y` that must be rewritten to turn `shown` into `next`
///
/// `None` means the row is unchanged. Without a previous frame the whole
/// row is dirty.
pub fn dirty_span(shown: Option<&FrameBuffer>, next: &FrameBuffer, y: u16) -> Option<Range<u16>> {
    let Some(shown) = shown else {
        return (next.width() > 0).then(|| 0..next.width());
    };
    let differs = |x: &u16| shown.get(*x, y) != next.get(*x, y);
    let first = (0..next.width()).find(differs)?;
    let last = (first..next.width()).rev().find(differs)?;
    Some(first..last + 1)
}

/// Queue the commands that repaint the dirty spans of `next`
///
/// `span` is scratch space for grouping equally styled cells.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
    span: &mut String,
) -> io::Result<()> {
    for y in 0..next.height() {
        let Some(cols) = dirty_span(shown, next, y) else {
            continue;
        };
        out.queue(MoveTo(cols.start, y))?;

        span.clear();
        let mut style = None;
        for x in cols {
            let cell = next.get(x, y).unwrap_or_default();
            if let Some(prev) = style.filter(|s| *s != cell.style) {
                print_span(out, prev, span)?;
            }
            style = Some(cell.style);
            span.push(cell.ch);
        }
        if let Some(last) = style {
            print_span(out, last, span)?;
        }
    }
    Ok(())
}

fn print_span(out: &mut Vec<u8>, style: CellStyle, span: &mut String) -> io::Result<()> {
    if !span.is_empty() {
        out.queue(PrintStyledContent(StyledContent::new(
            content_style(style),
            span.as_str(),
        )))?;
        span.clear();
    }
    Ok(())
}

fn content_style(style: CellStyle) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color(style.fg)),
        background_color: Some(color(style.bg)),
        attributes: if style.bold {
            Attribute::Bold.into()
        } else {
            Attributes::default()
        },
        ..ContentStyle::default()
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
