//! Forbidden-move classification for Sente.
//!
//! A placed Sente stone is forbidden when, considered as already placed, it
//! exhibits any of: two or more axes with an open three through it, two or
//! more axes with a run of exactly four, or any run longer than five.
//!
//! Classification is path-dependent: placing one stone can change the shape
//! of other Sente stones on a line through it (extending a three into contact
//! with another three, and so on). The move-time check therefore re-examines
//! every Sente stone contiguous with the candidate along each axis, not just
//! the candidate itself.

use super::scan::{self, Axis, Board};
use crate::game::types::{Side, Square, Violation};
use crate::grid::GridError;

/// Classifies the Sente stone at `(row, col)` as it stands on the board.
///
/// Returns `None` for empty or Gote cells; Gote is never subject to these
/// rules.
pub fn violation_at(board: &Board, row: usize, col: usize) -> Option<Violation> {
    if scan::square_at(board, row as isize, col as isize) != Some(Square::Occupied(Side::Sente)) {
        return None;
    }

    let mut open_threes = 0;
    let mut fours = 0;
    for axis in Axis::ALL {
        let run = scan::direction_count(board, row, col, axis);
        if run > 5 {
            return Some(Violation::Overline);
        }
        if run == 4 {
            fours += 1;
        }
        if run == 3 && scan::open_degree(board, row, col, axis) == 2 {
            open_threes += 1;
        }
    }
    if fours >= 2 {
        return Some(Violation::DoubleFour);
    }
    if open_threes >= 2 {
        return Some(Violation::DoubleThree);
    }
    None
}

/// Classifies a just-placed candidate together with every Sente stone
/// contiguous with it.
///
/// The candidate at `(row, col)` must already be on the board. After the
/// candidate itself passes, each of the four axes is walked outward in both
/// directions while consecutive cells hold Sente, re-running the classifier
/// at every visited stone. Any violation rejects the whole move.
pub fn chained_violation(board: &Board, row: usize, col: usize) -> Option<Violation> {
    if let Some(violation) = violation_at(board, row, col) {
        return Some(violation);
    }

    for axis in Axis::ALL {
        let (dr, dc) = axis.delta();
        for (sr, sc) in [(dr, dc), (-dr, -dc)] {
            let (mut r, mut c) = (row as isize + sr, col as isize + sc);
            while scan::square_at(board, r, c) == Some(Square::Occupied(Side::Sente)) {
                if let Some(violation) = violation_at(board, r as usize, c as usize) {
                    return Some(violation);
                }
                r += sr;
                c += sc;
            }
        }
    }
    None
}

/// Hypothetically places a Sente stone on an empty cell, classifies it with
/// the chained check, and reverts the board.
///
/// # Errors
///
/// Fails with [`GridError::OutOfRange`] when the cell lies outside the board.
pub fn probe_placement(
    board: &mut Board,
    row: usize,
    col: usize,
) -> Result<Option<Violation>, GridError> {
    board.set(row, col, Square::Occupied(Side::Sente))?;
    let violation = chained_violation(board, row, col);
    board.set(row, col, Square::Empty)?;
    Ok(violation)
}
