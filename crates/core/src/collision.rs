//! Fit checker - the single predicate behind every move, rotation and drop
//!
//! Callers test the *target* pose first and only commit it when it fits.

use crate::field::Field;
use crate::pieces::Tetromino;
use crate::types::{Rotation, FIELD_HEIGHT, FIELD_WIDTH};

/// Whether `piece` would sit on legal, empty cells at `(x, y, rotation)`
///
/// Every filled cell must land in columns `1..=10`, above the floor row, and
/// on an empty field cell.
pub fn fits(field: &Field, piece: &Tetromino, x: i8, y: i8, rotation: Rotation) -> bool {
    let shape = piece.shape();
    let side = shape.side as usize;

    for ly in 0..side {
        for lx in 0..side {
            if !shape.is_filled(lx, ly, rotation) {
                continue;
            }
            // Widened so far-off candidate poses cannot overflow.
            let fx = x as i16 + lx as i16;
            let fy = y as i16 + ly as i16;
            if fx < 1 || fx > FIELD_WIDTH as i16 - 2 || fy >= FIELD_HEIGHT as i16 - 1 {
                return false;
            }
            // fx is 1..=10 and fy is at least i8::MIN here, so both fit in i8.
            if field.is_occupied(fx as i8, fy as i8) {
                return false;
            }
        }
    }
    true
}

/// Fit check for the piece's own pose
pub fn fits_in_place(field: &Field, piece: &Tetromino) -> bool {
    fits(field, piece, piece.x, piece.y, piece.rotation)
}
