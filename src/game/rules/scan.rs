//! Line-scanning primitives over a board.
//!
//! Every rule in this game, win detection as much as the forbidden-move
//! classifier, reduces to questions about the contiguous same-color run
//! through a cell along one of four axes, and about whether the cells just
//! past the ends of that run are open.

use crate::game::types::{Side, Square};
use crate::grid::Grid;

/// The four scanning axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left-right.
    Horizontal,
    /// Up-down.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    /// All four axes, in scanning order.
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Unit step along this axis.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Board alias used throughout the rules.
pub type Board = Grid<Square>;

/// Returns the square at signed coordinates, or `None` when out of bounds.
pub(crate) fn square_at(board: &Board, row: isize, col: isize) -> Option<Square> {
    if row < 0 || col < 0 {
        return None;
    }
    let (row, col) = (row as usize, col as usize);
    if !board.contains(row, col) {
        return None;
    }
    board.get(row, col).ok().copied()
}

/// Number of consecutive `side` stones strictly beyond `(row, col)` in the
/// direction `(dr, dc)`.
fn run_beyond(board: &Board, row: usize, col: usize, side: Side, dr: isize, dc: isize) -> usize {
    let mut len = 0;
    let (mut r, mut c) = (row as isize + dr, col as isize + dc);
    while square_at(board, r, c) == Some(Square::Occupied(side)) {
        len += 1;
        r += dr;
        c += dc;
    }
    len
}

/// Total same-color run length through `(row, col)` along `axis`.
///
/// Scans outward in both directions from the cell and sums, so the result is
/// the length of the whole run the cell participates in, not just one side.
/// Returns 0 for an empty cell.
pub fn direction_count(board: &Board, row: usize, col: usize, axis: Axis) -> usize {
    let Some(Square::Occupied(side)) = square_at(board, row as isize, col as isize) else {
        return 0;
    };
    let (dr, dc) = axis.delta();
    1 + run_beyond(board, row, col, side, dr, dc) + run_beyond(board, row, col, side, -dr, -dc)
}

/// Number of ends (0, 1, or 2) of the run through `(row, col)` along `axis`
/// whose immediately-following cell is in-bounds and empty.
///
/// 0 = closed, 1 = half-open, 2 = open. An open three is a run of exactly 3
/// with degree 2.
pub fn open_degree(board: &Board, row: usize, col: usize, axis: Axis) -> u8 {
    let Some(Square::Occupied(side)) = square_at(board, row as isize, col as isize) else {
        return 0;
    };
    let (dr, dc) = axis.delta();
    let forward = run_beyond(board, row, col, side, dr, dc) as isize;
    let backward = run_beyond(board, row, col, side, -dr, -dc) as isize;

    let mut degree = 0;
    let past_forward = square_at(
        board,
        row as isize + dr * (forward + 1),
        col as isize + dc * (forward + 1),
    );
    if past_forward == Some(Square::Empty) {
        degree += 1;
    }
    let past_backward = square_at(
        board,
        row as isize - dr * (backward + 1),
        col as isize - dc * (backward + 1),
    );
    if past_backward == Some(Square::Empty) {
        degree += 1;
    }
    degree
}

/// Maximum [`direction_count`] over the four axes.
pub fn max_connect(board: &Board, row: usize, col: usize) -> usize {
    Axis::ALL
        .into_iter()
        .map(|axis| direction_count(board, row, col, axis))
        .max()
        .unwrap_or(0)
}

/// True iff some axis run through `(row, col)` is exactly five.
///
/// Used to break ties between "is a win" and "is an overline violation" when
/// another run through the same cell exceeds five.
pub fn has_five(board: &Board, row: usize, col: usize) -> bool {
    Axis::ALL
        .into_iter()
        .any(|axis| direction_count(board, row, col, axis) == 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::Side::*;

    fn board_with(stones: &[(usize, usize, Side)]) -> Board {
        let mut board = Board::new(15, 15, Square::Empty);
        for &(r, c, side) in stones {
            board.set(r, c, Square::Occupied(side)).unwrap();
        }
        board
    }

    #[test]
    fn counts_whole_run_through_cell() {
        let board = board_with(&[(7, 5, Sente), (7, 6, Sente), (7, 7, Sente), (7, 8, Sente)]);
        // Interior cell sees the full run, not one side of it.
        assert_eq!(direction_count(&board, 7, 6, Axis::Horizontal), 4);
        assert_eq!(direction_count(&board, 7, 5, Axis::Horizontal), 4);
        assert_eq!(direction_count(&board, 7, 6, Axis::Vertical), 1);
    }

    #[test]
    fn opponent_stones_terminate_runs() {
        let board = board_with(&[(7, 5, Sente), (7, 6, Sente), (7, 7, Gote)]);
        assert_eq!(direction_count(&board, 7, 6, Axis::Horizontal), 2);
    }

    #[test]
    fn empty_cell_counts_zero() {
        let board = board_with(&[]);
        assert_eq!(direction_count(&board, 7, 7, Axis::Horizontal), 0);
        assert_eq!(max_connect(&board, 7, 7), 0);
    }

    #[test]
    fn open_degree_distinguishes_ends() {
        // Open on both ends.
        let board = board_with(&[(7, 5, Sente), (7, 6, Sente), (7, 7, Sente)]);
        assert_eq!(open_degree(&board, 7, 6, Axis::Horizontal), 2);

        // Blocked on one end by an opponent stone.
        let board = board_with(&[(7, 5, Sente), (7, 6, Sente), (7, 7, Sente), (7, 8, Gote)]);
        assert_eq!(open_degree(&board, 7, 6, Axis::Horizontal), 1);

        // Blocked on the other end by the board edge.
        let board = board_with(&[(7, 0, Sente), (7, 1, Sente), (7, 2, Sente)]);
        assert_eq!(open_degree(&board, 7, 1, Axis::Horizontal), 1);
    }

    #[test]
    fn diagonal_runs_count() {
        let board = board_with(&[(5, 5, Gote), (6, 6, Gote), (7, 7, Gote), (8, 8, Gote)]);
        assert_eq!(direction_count(&board, 6, 6, Axis::Diagonal), 4);
        let board = board_with(&[(5, 9, Gote), (6, 8, Gote), (7, 7, Gote)]);
        assert_eq!(direction_count(&board, 6, 8, Axis::AntiDiagonal), 3);
    }

    #[test]
    fn has_five_requires_exactly_five() {
        let mut stones: Vec<(usize, usize, Side)> =
            (4..9).map(|c| (7, c, Sente)).collect();
        let board = board_with(&stones);
        assert!(has_five(&board, 7, 6));

        stones.push((7, 9, Sente));
        let board = board_with(&stones);
        assert!(!has_five(&board, 7, 6));
        assert_eq!(max_connect(&board, 7, 6), 6);
    }
}
