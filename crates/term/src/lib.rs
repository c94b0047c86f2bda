//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. Snapshots
//! are drawn into a simple framebuffer that is then flushed to the terminal
//! through crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Only rewrite the cells that changed between frames
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod presenter;
pub mod renderer;

pub use tty_tetris_core as core;
pub use tty_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Rgb, ScreenCell};
pub use game_view::{cell_glyph, AnchorY, GameView, Viewport};
pub use presenter::TerminalPresenter;
pub use renderer::{dirty_span, encode_frame, TerminalRenderer};
