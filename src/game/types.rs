//! Core domain types for the renju board.

use derive_more::{Display, Error};
use strum::{Display as StrumDisplay, EnumString};

/// One of the two sides of the game.
///
/// Sente moves first and is the only side subject to forbidden-move rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
pub enum Side {
    /// The first player (black stones, `@` in the save format).
    Sente,
    /// The second player (white stones, `O` in the save format).
    Gote,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// No stone.
    Empty,
    /// A stone of the given side.
    Occupied(Side),
}

impl Square {
    /// Returns the side occupying this square, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::Occupied(side) => Some(side),
        }
    }

    /// Returns true iff no stone occupies this square.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }
}

/// A recorded move: the stone that was placed, not the side to move next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Row of the placed stone.
    pub row: usize,
    /// Column of the placed stone.
    pub col: usize,
    /// The side that placed it.
    pub side: Side,
}

/// Which side, if any, the automated opponent drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumString)]
pub enum EngineStatus {
    /// Both sides are human (PVP).
    Disabled,
    /// The automated opponent plays Sente.
    Sente,
    /// The automated opponent plays Gote.
    #[default]
    Gote,
}

impl EngineStatus {
    /// Returns the side the automated opponent plays, if enabled.
    pub fn side(self) -> Option<Side> {
        match self {
            EngineStatus::Disabled => None,
            EngineStatus::Sente => Some(Side::Sente),
            EngineStatus::Gote => Some(Side::Gote),
        }
    }

    /// Swaps the automated side, leaving `Disabled` untouched.
    pub fn reversed(self) -> Self {
        match self {
            EngineStatus::Disabled => EngineStatus::Disabled,
            EngineStatus::Sente => EngineStatus::Gote,
            EngineStatus::Gote => EngineStatus::Sente,
        }
    }
}

/// How forbidden-move violations are treated for Sente.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ForbiddenPolicy {
    /// Violating moves are rejected.
    #[default]
    Enforced,
    /// Violating moves are allowed but logged as warnings.
    Advisory,
    /// The forbidden-move check is skipped entirely.
    Off,
}

/// A forbidden shape exhibited by a Sente stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Violation {
    /// Two or more axes carry an open three through the stone.
    #[display("double open three")]
    DoubleThree,
    /// Two or more axes carry a run of exactly four through the stone.
    #[display("double four")]
    DoubleFour,
    /// Some run through the stone is longer than five.
    #[display("overline")]
    Overline,
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The stone was placed; the game continues.
    Success,
    /// The stone was placed and wins the game for its side.
    Win,
}

/// Rule rejections. These are ordinary results: the caller may retry with
/// different input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The acting side is not on move.
    #[display("it is not {side}'s turn")]
    WrongTurn {
        /// The side that tried to move.
        side: Side,
    },
    /// The target cell is out of bounds or occupied.
    #[display("({row}, {col}) is not a playable location")]
    InvalidLocation {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The placement violates the forbidden-move rules for Sente.
    #[display("move rejected: {_0}")]
    ViolationRejected(#[error(not(source))] Violation),
    /// No vacant cell remains for the automated opponent to pick.
    #[display("the board has no vacant cell")]
    BoardFull,
    /// An automated move was requested while no side is automated.
    #[display("the automated opponent is disabled")]
    EngineDisabled,
}

/// Invariant violations. These indicate a bug, not user error: they are
/// fatal to the worker that observes them and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, derive_more::From)]
pub enum InvariantError {
    /// The grid reported dimensions inconsistent with its storage.
    #[display("grid corruption: {_0}")]
    Grid(crate::grid::GridError),
    /// An undone log entry disagreed with the cell it names.
    #[display("undo mismatch at ({row}, {col}): log says {logged}, board holds {found:?}")]
    #[from(ignore)]
    UndoMismatch {
        /// Row of the popped entry.
        row: usize,
        /// Column of the popped entry.
        col: usize,
        /// The side the log recorded.
        logged: Side,
        /// What the grid actually held.
        found: Square,
    },
    /// An automated-move request lost its reply channel.
    #[display("no pending reply channel for engine-move request {token}")]
    #[from(ignore)]
    LostCorrelation {
        /// The orphaned request token.
        token: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn side_tokens_round_trip() {
        assert_eq!(Side::Sente.to_string(), "Sente");
        assert_eq!(Side::from_str("Gote").unwrap(), Side::Gote);
        assert!(Side::from_str("gote").is_err());
    }

    #[test]
    fn engine_status_tokens_round_trip() {
        for status in [EngineStatus::Disabled, EngineStatus::Sente, EngineStatus::Gote] {
            assert_eq!(
                EngineStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn reversing_engine_status_swaps_seats() {
        assert_eq!(EngineStatus::Sente.reversed(), EngineStatus::Gote);
        assert_eq!(EngineStatus::Gote.reversed(), EngineStatus::Sente);
        assert_eq!(EngineStatus::Disabled.reversed(), EngineStatus::Disabled);
    }
}
