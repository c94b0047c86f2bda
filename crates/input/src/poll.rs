//! Non-blocking key polling, one event per tick.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::map::{handle_key_event, should_quit};
use crate::types::GameAction;

/// What the harness should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Action(GameAction),
    Quit,
}

/// Translate one terminal event.
///
/// Releases and unbound keys yield `None`. Auto-repeat presses count as
/// presses, so holding a key keeps moving the piece.
pub fn interpret(ev: &Event) -> Option<InputEvent> {
    let Event::Key(key) = ev else {
        return None;
    };
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(*key) {
        return Some(InputEvent::Quit);
    }
    handle_key_event(*key).map(InputEvent::Action)
}

/// Read at most one pending event without waiting.
pub fn poll_input() -> io::Result<Option<InputEvent>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    let ev = event::read()?;
    Ok(interpret(&ev))
}
