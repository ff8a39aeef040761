//! Win detection.
//!
//! The win rule is asymmetric. Gote wins with a run of five or more anywhere.
//! Sente wins only with a run of *exactly* five: a longer run through the
//! placed stone is an overline, not a win, unless that same stone also
//! participates in a genuine run of exactly five along a different axis, in
//! which case the win still stands.

use super::scan::{self, Board};
use crate::game::types::{Side, Square};

/// True iff the stone at `(row, col)` completes a winning line for its own
/// side. Returns false for an empty cell.
pub fn winning_placement(board: &Board, row: usize, col: usize) -> bool {
    let Some(Square::Occupied(side)) = scan::square_at(board, row as isize, col as isize) else {
        return false;
    };
    match side {
        Side::Gote => scan::max_connect(board, row, col) >= 5,
        Side::Sente => scan::has_five(board, row, col),
    }
}
