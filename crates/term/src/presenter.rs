//! Terminal implementation of the core `Presenter` seam.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::core::{GameSnapshot, Presenter};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Renders each snapshot to the terminal and sleeps through line-clear pauses
pub struct TerminalPresenter {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
}

impl TerminalPresenter {
    pub fn new(renderer: TerminalRenderer, view: GameView) -> Self {
        Self {
            renderer,
            view,
            fb: FrameBuffer::new(0, 0),
        }
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer {
        &mut self.renderer
    }
}

impl Presenter for TerminalPresenter {
    type Error = anyhow::Error;

    fn present(&mut self, frame: &GameSnapshot) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(frame, Viewport::new(w, h), &mut self.fb);
        self.renderer
            .draw_swap(&mut self.fb)
            .context("drawing frame")
    }

    fn line_clear_pause(&mut self, pause: Duration) -> Result<()> {
        thread::sleep(pause);
        Ok(())
    }
}
