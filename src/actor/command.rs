//! Commands consumed by the game actor's worker.

use crate::codec::CodecError;
use crate::game::rules::Board;
use crate::game::{EngineStatus, GameSnapshot, MoveError, MoveOutcome, Side};
use std::path::PathBuf;
use tokio::sync::oneshot;

/// Result of a move request as delivered to callers.
pub type MoveReply = Result<MoveOutcome, MoveError>;

/// Unique correlation token for an automated-move request.
pub type RequestToken = u64;

/// A tagged request for the worker.
///
/// A command is owned by the queue from enqueue until the worker consumes
/// it; its reply channel is owned jointly by the enqueuing caller (reader)
/// and the worker (single writer, write-once).
#[derive(Debug)]
pub enum Command {
    /// Place a stone for the human-controlled side.
    MakeMove {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
        /// Fulfilled with the arbitration result.
        reply: oneshot::Sender<MoveReply>,
    },
    /// Undo the latest move (two plies under automated play).
    Undo {
        /// Fulfilled with the number of plies undone.
        reply: oneshot::Sender<usize>,
    },
    /// Replace the game with a fresh one of the given dimensions.
    NewGame {
        /// New row count.
        rows: usize,
        /// New column count.
        cols: usize,
        /// Fulfilled when the fresh game is in place.
        reply: oneshot::Sender<()>,
    },
    /// Serialize the game to a file via a detached snapshot request.
    Save {
        /// Destination path.
        path: PathBuf,
        /// Fulfilled by the detached save task.
        reply: oneshot::Sender<Result<(), CodecError>>,
    },
    /// Replace the game with the contents of a save file.
    Load {
        /// Source path.
        path: PathBuf,
        /// Fulfilled with the load result; failure leaves the game untouched.
        reply: oneshot::Sender<Result<(), CodecError>>,
    },
    /// Copy out the board.
    QueryBoard {
        /// Fulfilled with a by-value board copy.
        reply: oneshot::Sender<Board>,
    },
    /// Copy out the full game state.
    QuerySnapshot {
        /// Fulfilled with a by-value snapshot.
        reply: oneshot::Sender<GameSnapshot>,
    },
    /// Ask the automated opponent for a move and apply it.
    ///
    /// The reply channel travels on the side table keyed by `token`, not in
    /// the command itself; losing the correlation is fatal to the worker.
    EngineMove {
        /// Correlation token registered by the requesting handle.
        token: RequestToken,
    },
    /// Swap player names and the automated seat.
    ReverseSides {
        /// Fulfilled with the engine status after the swap.
        reply: oneshot::Sender<EngineStatus>,
    },
    /// Rename one player.
    SetName {
        /// Which side to rename.
        side: Side,
        /// The new name.
        name: String,
        /// Fulfilled when applied.
        reply: oneshot::Sender<()>,
    },
    /// Change which side the automated opponent drives.
    SetEngineStatus {
        /// The new status.
        status: EngineStatus,
        /// Fulfilled when applied.
        reply: oneshot::Sender<()>,
    },
    /// Stop the worker after this command; later commands are dropped.
    Quit,
}
