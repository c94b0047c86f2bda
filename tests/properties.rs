//! Property tests for the core rules.
//!
//! Generated seeds, poses and input scripts check the invariants that must
//! hold no matter what the player does:
//! - rotation tables map every cell of the box to a distinct cell
//! - the O piece's footprint ignores rotation
//! - every run of seven draws is a permutation of the seven identities
//! - walls survive, score never decreases, the falling piece fits
//!   once below the spawn rows, and no completed row is left on the field

use proptest::prelude::*;
use tty_tetris::core::rotation::cell_index;
use tty_tetris::core::{fits, fits_in_place, Field, GameState, NullPresenter, PieceBag, Tetromino};
use tty_tetris::types::{Cell, GameAction, PieceKind, Rotation, SPAWN_Y};

fn action_from(code: u8) -> Option<GameAction> {
    match code {
        0 => Some(GameAction::MoveLeft),
        1 => Some(GameAction::MoveRight),
        2 => Some(GameAction::SoftDrop),
        3 => Some(GameAction::RotateCw),
        4 => Some(GameAction::RotateCcw),
        _ => None,
    }
}

fn rotation_from(i: usize) -> Rotation {
    Rotation::ALL[i % 4]
}

fn assert_walls_intact(field: &Field) {
    for y in 0..18 {
        assert_eq!(field.get(0, y), Some(Cell::Wall));
        assert_eq!(field.get(11, y), Some(Cell::Wall));
    }
    for x in 0..12 {
        assert_eq!(field.get(x, 17), Some(Cell::Wall));
    }
}

proptest! {
    #[test]
    fn rotation_is_a_bijection(side in 3usize..=4, r in 0usize..4) {
        let rotation = rotation_from(r);
        let mut seen = vec![false; side * side];
        for y in 0..side {
            for x in 0..side {
                let i = cell_index(x, y, rotation, side);
                prop_assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }

    #[test]
    fn o_piece_fit_ignores_rotation(
        x in -2i8..12,
        y in -2i8..19,
        blocks in prop::collection::vec((1i8..=10, 0i8..17), 0..30),
    ) {
        let mut field = Field::new();
        for (bx, by) in blocks {
            field.set(bx, by, Cell::Block(PieceKind::T));
        }
        let o = Tetromino::spawn(PieceKind::O);
        let north = fits(&field, &o, x, y, Rotation::North);
        for rotation in Rotation::ALL {
            prop_assert_eq!(fits(&field, &o, x, y, rotation), north);
        }
    }

    #[test]
    fn bag_windows_are_permutations(seed in any::<u32>()) {
        let draws: Vec<PieceKind> = PieceBag::new(seed).take(70).collect();
        for window in draws.chunks(7) {
            let mut counts = [0u8; 7];
            for kind in window {
                counts[kind.index()] += 1;
            }
            prop_assert_eq!(counts, [1u8; 7]);
        }
    }

    #[test]
    fn random_play_keeps_core_invariants(
        seed in any::<u32>(),
        script in prop::collection::vec(0u8..8, 1..600),
    ) {
        let mut state = GameState::new(seed);
        let mut last_score = 0;

        for code in script {
            let _ = state.step(action_from(code), &mut NullPresenter);

            assert_walls_intact(state.field());
            prop_assert!(state.score() >= last_score);
            last_score = state.score();
            prop_assert!(state.progression().lines_toward_level < 10);
            prop_assert!(state.ticks_per_drop() >= 1);

            if state.game_over() {
                prop_assert!(state.active().is_none());
                break;
            }

            let active = state.active();
            prop_assert!(active.is_some());
            // A fresh spawn may overlap a stack that reached the top rows;
            // it can only get below them through fitting moves.
            if let Some(piece) = active.filter(|p| p.y > SPAWN_Y) {
                prop_assert!(fits_in_place(state.field(), &piece));
            }
            for y in 0..17 {
                prop_assert!(!state.field().is_row_full(y), "row {} left full", y);
                prop_assert!(state.field().row(y).iter().all(|c| *c != Cell::Clearing));
            }
        }
    }
}
