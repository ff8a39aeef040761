//! The rule engine: authoritative game state and move arbitration.
//!
//! A `RuleEngine` owns one board plus the ordered move log and implements
//! turn order, win detection, forbidden-move detection, move application and
//! undo. It has exactly two states, awaiting Sente and awaiting Gote,
//! derived from the move count; Sente always moves first.

use crate::game::rules;
use crate::game::rules::Board;
use crate::game::types::{
    EngineStatus, ForbiddenPolicy, InvariantError, Move, MoveError, MoveOutcome, Side, Square,
    Violation,
};
use tracing::{debug, instrument, warn};

/// Default board dimension.
pub const STANDARD_SIZE: usize = 15;

/// Full by-value copy of the game state.
///
/// This is the only form in which state crosses a worker boundary; a live
/// engine is never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// The board cells.
    pub board: Board,
    /// The ordered move log.
    pub log: Vec<Move>,
    /// Name of the Sente player.
    pub sente_name: String,
    /// Name of the Gote player.
    pub gote_name: String,
    /// Which side the automated opponent drives.
    pub engine_status: EngineStatus,
}

/// Authoritative game state plus the rules that arbitrate it.
#[derive(Debug)]
pub struct RuleEngine {
    board: Board,
    log: Vec<Move>,
    sente_name: String,
    gote_name: String,
    engine_status: EngineStatus,
    policy: ForbiddenPolicy,
}

impl RuleEngine {
    /// Creates a fresh engine with an empty board of the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            board: Board::new(rows, cols, Square::Empty),
            log: Vec::new(),
            sente_name: "Anonymous".to_string(),
            gote_name: "Anonymous".to_string(),
            engine_status: EngineStatus::default(),
            policy: ForbiddenPolicy::default(),
        }
    }

    /// Creates a fresh engine on the standard 15x15 board.
    pub fn standard() -> Self {
        Self::new(STANDARD_SIZE, STANDARD_SIZE)
    }

    /// Rebuilds an engine from a snapshot, e.g. one parsed from a save file.
    ///
    /// The forbidden-move policy is runtime configuration, not part of the
    /// persisted state, so it is supplied by the caller.
    pub fn from_snapshot(snapshot: GameSnapshot, policy: ForbiddenPolicy) -> Self {
        Self {
            board: snapshot.board,
            log: snapshot.log,
            sente_name: snapshot.sente_name,
            gote_name: snapshot.gote_name,
            engine_status: snapshot.engine_status,
            policy,
        }
    }

    /// The side whose turn it is. Alternates starting with Sente.
    pub fn side_to_move(&self) -> Side {
        if self.log.len() % 2 == 0 {
            Side::Sente
        } else {
            Side::Gote
        }
    }

    /// Number of moves applied so far.
    pub fn moves_made(&self) -> usize {
        self.log.len()
    }

    /// Read access to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read access to the move log.
    pub fn log(&self) -> &[Move] {
        &self.log
    }

    /// Name of the given side's player.
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Sente => &self.sente_name,
            Side::Gote => &self.gote_name,
        }
    }

    /// Renames the given side's player.
    pub fn set_name(&mut self, side: Side, name: String) {
        match side {
            Side::Sente => self.sente_name = name,
            Side::Gote => self.gote_name = name,
        }
    }

    /// Which side the automated opponent drives.
    pub fn engine_status(&self) -> EngineStatus {
        self.engine_status
    }

    /// Changes which side the automated opponent drives.
    pub fn set_engine_status(&mut self, status: EngineStatus) {
        self.engine_status = status;
    }

    /// The active forbidden-move policy.
    pub fn policy(&self) -> ForbiddenPolicy {
        self.policy
    }

    /// Sets the forbidden-move policy.
    pub fn set_policy(&mut self, policy: ForbiddenPolicy) {
        self.policy = policy;
    }

    /// Swaps the two players: names trade places and the automated opponent
    /// (if any) takes the other color.
    #[instrument(skip(self))]
    pub fn reverse_sides(&mut self) -> EngineStatus {
        std::mem::swap(&mut self.sente_name, &mut self.gote_name);
        self.engine_status = self.engine_status.reversed();
        debug!(status = %self.engine_status, "sides reversed");
        self.engine_status
    }

    /// True iff `(row, col)` is on the board and empty.
    pub fn is_vacant(&self, row: usize, col: usize) -> bool {
        matches!(self.board.get(row, col), Ok(Square::Empty))
    }

    /// All currently-empty cells, in row-major order.
    pub fn vacancies(&self) -> Vec<(usize, usize)> {
        self.board
            .iter()
            .filter(|(_, _, square)| square.is_empty())
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// Classifies a hypothetical Sente placement on an empty cell without
    /// changing the game: place, evaluate the chained check, revert.
    ///
    /// # Errors
    ///
    /// Fails with [`MoveError::InvalidLocation`] when the cell is out of
    /// bounds or occupied.
    pub fn would_violate(&mut self, row: usize, col: usize) -> Result<Option<Violation>, MoveError> {
        if !self.is_vacant(row, col) {
            return Err(MoveError::InvalidLocation { row, col });
        }
        rules::probe_placement(&mut self.board, row, col)
            .map_err(|_| MoveError::InvalidLocation { row, col })
    }

    /// Applies a move for `side`.
    ///
    /// On success the cell is written, the move is appended to the log, and
    /// the outcome reports whether the placement wins the game for its side.
    /// A Sente placement that completes a genuine run of exactly five wins
    /// even when a forbidden shape co-occurs; otherwise Sente placements run
    /// the chained forbidden check under the active policy.
    ///
    /// # Errors
    ///
    /// Rejects with [`MoveError::InvalidLocation`] (out of bounds or
    /// occupied), [`MoveError::WrongTurn`], or
    /// [`MoveError::ViolationRejected`]. Rejections leave the state
    /// untouched.
    #[instrument(skip(self))]
    pub fn apply_move(
        &mut self,
        row: usize,
        col: usize,
        side: Side,
    ) -> Result<MoveOutcome, MoveError> {
        if !self.is_vacant(row, col) {
            return Err(MoveError::InvalidLocation { row, col });
        }
        if side != self.side_to_move() {
            return Err(MoveError::WrongTurn { side });
        }

        self.board
            .set(row, col, Square::Occupied(side))
            .map_err(|_| MoveError::InvalidLocation { row, col })?;

        let win = rules::winning_placement(&self.board, row, col);
        if side == Side::Sente && !win && self.policy != ForbiddenPolicy::Off {
            if let Some(violation) = rules::chained_violation(&self.board, row, col) {
                match self.policy {
                    ForbiddenPolicy::Enforced => {
                        self.board
                            .set(row, col, Square::Empty)
                            .map_err(|_| MoveError::InvalidLocation { row, col })?;
                        debug!(%violation, row, col, "move rejected");
                        return Err(MoveError::ViolationRejected(violation));
                    }
                    ForbiddenPolicy::Advisory => {
                        warn!(%violation, row, col, "forbidden shape allowed under advisory policy");
                    }
                    ForbiddenPolicy::Off => {}
                }
            }
        }

        self.log.push(Move { row, col, side });
        debug!(row, col, %side, win, moves = self.log.len(), "move applied");
        Ok(if win {
            MoveOutcome::Win
        } else {
            MoveOutcome::Success
        })
    }

    /// Undoes the most recent move.
    ///
    /// With an automated opponent enabled, two entries are popped (the human
    /// move and the automated reply) so control returns to the human side.
    /// An empty log is a no-op, not an error. Returns the number of plies
    /// actually undone.
    ///
    /// # Errors
    ///
    /// Fails with [`InvariantError::UndoMismatch`] when a popped entry
    /// disagrees with the cell it names. That indicates a corrupted state and
    /// is fatal to the owning worker.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<usize, InvariantError> {
        let plies = match self.engine_status {
            EngineStatus::Disabled => 1,
            _ => 2,
        };
        let mut undone = 0;
        for _ in 0..plies {
            let Some(entry) = self.log.pop() else { break };
            let square = *self.board.get(entry.row, entry.col)?;
            if square != Square::Occupied(entry.side) {
                return Err(InvariantError::UndoMismatch {
                    row: entry.row,
                    col: entry.col,
                    logged: entry.side,
                    found: square,
                });
            }
            self.board.set(entry.row, entry.col, Square::Empty)?;
            undone += 1;
        }
        debug!(undone, moves = self.log.len(), "undo complete");
        Ok(undone)
    }

    /// Replaces the board and move log with fresh empty instances of the
    /// given dimensions. Names, engine status and policy are kept.
    #[instrument(skip(self))]
    pub fn clear(&mut self, rows: usize, cols: usize) {
        self.board = Board::new(rows, cols, Square::Empty);
        self.log = Vec::new();
        debug!(rows, cols, "board cleared");
    }

    /// Produces a full by-value snapshot, running the grid corruption guard
    /// on the way out.
    ///
    /// # Errors
    ///
    /// Fails with [`InvariantError::Grid`] when the board's stored
    /// dimensions disagree with its backing storage.
    pub fn snapshot(&self) -> Result<GameSnapshot, InvariantError> {
        self.board.rows()?;
        self.board.cols()?;
        Ok(GameSnapshot {
            board: self.board.clone(),
            log: self.log.clone(),
            sente_name: self.sente_name.clone(),
            gote_name: self.gote_name.clone(),
            engine_status: self.engine_status,
        })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}
