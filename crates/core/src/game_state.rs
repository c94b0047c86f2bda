//! Game state module - the per-tick state machine
//!
//! This module ties together all core components: field, pieces, bag and
//! scoring. One call to [`GameState::step`] is one tick:
//!
//! 1. decide whether gravity is due (`tick >= ticks_per_drop`)
//! 2. apply the player's intent through the fit checker (test, then commit)
//! 3. drop one row if due, or mark the piece for locking when it cannot fall
//! 4. lock, detect full lines in the rows the piece touched, mark them
//! 5. present the marked lines, pause, score, collapse, spawn the next piece
//! 6. present the resulting frame
//!
//! [`GameState::advance`] and [`GameState::resolve_line_clear`] expose the
//! I/O-free halves of that sequence.

use std::time::Duration;

use log::{debug, info};

use crate::collision::fits;
use crate::field::{Field, FullLines};
use crate::pieces::Tetromino;
use crate::presenter::Presenter;
use crate::rng::{PieceBag, Shuffle, SimpleRng};
use crate::scoring::{ClearSummary, Progression};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A piece is falling
    Falling,
    /// Full lines are marked and waiting to collapse
    Clearing,
    /// The field overflowed
    GameOver,
}

/// What the I/O-free half of a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The piece is still falling
    Falling,
    /// The piece locked without completing a line; the next one spawned
    Locked { kind: PieceKind },
    /// The piece locked and completed `count` lines, now marked
    LinesMarked { count: usize },
    /// The piece could not fall from the top rows
    GameOver,
}

/// What a full tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Locked,
    LinesCleared(ClearSummary),
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    field: Field,
    active: Tetromino,
    bag: PieceBag<R>,
    progression: Progression,
    /// Ticks since the last forced drop
    tick: u32,
    /// Rows marked for clearing, top to bottom
    pending: FullLines,
    phase: Phase,
    /// Pieces spawned so far, including the current one
    pieces: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::with_bag(PieceBag::new(seed))
    }
}

impl<R: Shuffle> GameState<R> {
    /// Create a new game drawing pieces from `bag`
    pub fn with_bag(mut bag: PieceBag<R>) -> Self {
        let first = bag.draw();
        debug!("spawned {:?} (piece 1)", first);
        Self {
            field: Field::new(),
            active: Tetromino::spawn(first),
            bag,
            progression: Progression::new(),
            tick: 0,
            pending: FullLines::new(),
            phase: Phase::Falling,
            pieces: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progression.score
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn ticks_per_drop(&self) -> u32 {
        self.progression.ticks_per_drop
    }

    /// Ticks counted toward the next forced drop
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// The falling piece, if one is in play
    pub fn active(&self) -> Option<Tetromino> {
        (self.phase == Phase::Falling).then_some(self.active)
    }

    /// Rows currently marked for clearing
    pub fn pending_lines(&self) -> &[u8] {
        &self.pending
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access for scripted setups (puzzles, tests)
    ///
    /// Callers must keep the falling piece on empty cells.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn bag(&self) -> &PieceBag<R> {
        &self.bag
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_grid(&mut out.field);
        out.active = self.active().map(ActiveSnapshot::from);
        out.score = self.progression.score;
        out.lines = self.progression.lines;
        out.level = self.progression.level;
        out.ticks_per_drop = self.progression.ticks_per_drop;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Try to move the active piece; commits only if the target pose fits
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let (x, y) = (self.active.x + dx, self.active.y + dy);
        if !fits(&self.field, &self.active, x, y, self.active.rotation) {
            return false;
        }
        self.active.x = x;
        self.active.y = y;
        true
    }

    /// Try to rotate the active piece in place (no wall kicks)
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let rotation = if clockwise {
            self.active.rotation.rotate_cw()
        } else {
            self.active.rotation.rotate_ccw()
        };
        if !fits(&self.field, &self.active, self.active.x, self.active.y, rotation) {
            return false;
        }
        self.active.rotation = rotation;
        true
    }

    /// Input, gravity, lock and line marking for one tick, without any I/O
    pub fn advance(&mut self, action: Option<GameAction>) -> Advance {
        match self.phase {
            Phase::GameOver => return Advance::GameOver,
            Phase::Clearing => {
                return Advance::LinesMarked {
                    count: self.pending.len(),
                }
            }
            Phase::Falling => {}
        }

        let mut force_down = self.tick >= self.progression.ticks_per_drop;

        match action {
            Some(GameAction::MoveLeft) => {
                self.try_move(-1, 0);
            }
            Some(GameAction::MoveRight) => {
                self.try_move(1, 0);
            }
            Some(GameAction::SoftDrop) => force_down = true,
            Some(GameAction::RotateCw) => {
                self.try_rotate(true);
            }
            Some(GameAction::RotateCcw) => {
                self.try_rotate(false);
            }
            None => {}
        }

        let mut lock_pending = false;
        if force_down {
            lock_pending = !self.try_move(0, 1);
            self.tick = 0;
        }

        let result = if lock_pending {
            self.lock_active()
        } else {
            Advance::Falling
        };

        self.tick += 1;
        result
    }

    /// Lock the active piece onto the field and look for full lines
    fn lock_active(&mut self) -> Advance {
        let piece = self.active;

        // A piece that cannot leave the top rows means the stack reached the spawn area.
        if piece.y <= SPAWN_Y {
            self.phase = Phase::GameOver;
            info!(
                "game over: score {} lines {} level {}",
                self.progression.score, self.progression.lines, self.progression.level
            );
            return Advance::GameOver;
        }

        self.field.lock_piece(&piece);
        debug!("locked {:?} at ({}, {}) {:?}", piece.kind, piece.x, piece.y, piece.rotation);

        let rows = self.field.full_lines(piece.y, piece.side());
        if rows.is_empty() {
            self.spawn_next();
            return Advance::Locked { kind: piece.kind };
        }

        self.field.mark_lines(&rows);
        let count = rows.len();
        self.pending = rows;
        self.phase = Phase::Clearing;
        Advance::LinesMarked { count }
    }

    /// Score the marked lines, collapse them and spawn the next piece
    ///
    /// Returns `None` when no lines are marked.
    pub fn resolve_line_clear(&mut self) -> Option<ClearSummary> {
        if self.phase != Phase::Clearing {
            return None;
        }

        let summary = self.progression.record_clear(self.pending.len());
        info!(
            "cleared {} line(s) for {} points (score {})",
            summary.lines, summary.points, self.progression.score
        );
        if summary.level_up {
            info!(
                "level {} reached, {} ticks per drop",
                self.progression.level, self.progression.ticks_per_drop
            );
        }

        self.field.collapse(&self.pending);
        self.pending.clear();
        self.phase = Phase::Falling;
        self.spawn_next();
        Some(summary)
    }

    fn spawn_next(&mut self) {
        let kind = self.bag.draw();
        self.active.reset(kind);
        self.pieces = self.pieces.wrapping_add(1);
        debug!("spawned {:?} (piece {})", kind, self.pieces);
    }

    /// Run one tick and show its frames
    ///
    /// When lines complete, the presenter sees the marked rows, then the
    /// pause, then the collapsed field with the next piece.
    pub fn step<P: Presenter>(
        &mut self,
        action: Option<GameAction>,
        presenter: &mut P,
    ) -> Result<StepOutcome, P::Error> {
        let outcome = match self.advance(action) {
            Advance::Falling => StepOutcome::Continue,
            Advance::Locked { .. } => StepOutcome::Locked,
            Advance::GameOver => {
                presenter.present(&self.snapshot())?;
                return Ok(StepOutcome::GameOver {
                    score: self.progression.score,
                });
            }
            Advance::LinesMarked { .. } => {
                presenter.present(&self.snapshot())?;
                presenter.line_clear_pause(Duration::from_millis(LINE_CLEAR_PAUSE_MS))?;
                match self.resolve_line_clear() {
                    Some(summary) => StepOutcome::LinesCleared(summary),
                    None => StepOutcome::Continue,
                }
            }
        };

        presenter.present(&self.snapshot())?;
        Ok(outcome)
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
