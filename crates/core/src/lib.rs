//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on terminals or the clock, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Frames go through the [`Presenter`] trait, so it runs headless too
//! - **Allocation-free**: The tick path works on fixed-size arrays
//!
//! # Module Structure
//!
//! - [`field`]: 12x18 walled grid, locking, line detection and collapse
//! - [`collision`]: The fit check behind every move, rotation and drop
//! - [`pieces`]: Tetromino layouts and the falling piece
//! - [`rotation`]: Index tables for viewing a square layout under a rotation
//! - [`rng`]: 7-bag random piece generation for fair distribution
//! - [`scoring`]: Classic line-clear scoring and level progression
//! - [`game_state`]: The per-tick state machine
//! - [`snapshot`] / [`presenter`]: Read-only frames and where they go
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of seven pieces holds each identity once
//! - **Rotation**: in place, no wall kicks; a blocked rotation is ignored
//! - **Gravity**: one row every `ticks_per_drop` ticks, or at once on soft drop
//! - **Lock**: immediately when the piece cannot fall
//! - **Line Clears**: marked rows stay visible for 600ms, then collapse
//! - **Scoring**: 40/100/300/1200 times (level + 1), level up every 10 lines
//!
//! # Example
//!
//! ```
//! use tty_tetris_core::{GameState, NullPresenter, StepOutcome};
//! use tty_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! let outcome = game.step(Some(GameAction::MoveRight), &mut NullPresenter).unwrap();
//! assert_eq!(outcome, StepOutcome::Continue);
//! assert_eq!(game.active().unwrap().x, 5);
//!
//! // Soft drops fall one row per tick until the piece locks.
//! let mut locked = false;
//! for _ in 0..20 {
//!     if game.step(Some(GameAction::SoftDrop), &mut NullPresenter).unwrap() == StepOutcome::Locked {
//!         locked = true;
//!         break;
//!     }
//! }
//! assert!(locked);
//! assert_eq!(game.pieces(), 2);
//! ```
//!
//! # Timing
//!
//! The caller drives [`GameState::step`] once per fixed tick
//! ([`types::TICK_US`]); the core itself never reads the clock.

pub mod collision;
pub mod field;
pub mod game_state;
pub mod pieces;
pub mod presenter;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use tty_tetris_types as types;

// Re-export commonly used types for convenience
pub use collision::{fits, fits_in_place};
pub use field::{Field, FullLines};
pub use game_state::{Advance, GameState, Phase, StepOutcome};
pub use pieces::{get_shape, Shape, Tetromino};
pub use presenter::{NullPresenter, Presenter};
pub use rng::{PieceBag, Shuffle, SimpleRng};
pub use scoring::{line_clear_points, next_ticks_per_drop, ClearSummary, Progression};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
