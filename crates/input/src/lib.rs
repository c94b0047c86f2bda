//! Terminal input module.
//!
//! Maps `crossterm` key events onto the fixed [`crate::types::GameAction`]
//! bindings and polls the terminal without blocking, one event per tick.

pub mod map;
pub mod poll;

pub use tty_tetris_types as types;

pub use map::{handle_key_event, should_quit};
pub use poll::{interpret, poll_input, InputEvent};
