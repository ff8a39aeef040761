//! Caller-facing handle to the game actor.
//!
//! Every operation enqueues a command and returns a [`Pending`] reply handle
//! immediately; the caller never blocks at enqueue time. Waiting on the
//! reply is bounded: the single-writer model cannot explain indefinite delay
//! except by a stalled worker, so a timeout is treated as fatal by callers.

use super::command::{Command, MoveReply, RequestToken};
use crate::codec::CodecError;
use crate::game::rules::Board;
use crate::game::{EngineStatus, GameSnapshot, Side};
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// How long a caller waits on a reply before declaring the worker stalled.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Failures while waiting on an actor reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ActorError {
    /// The worker is gone, or the command was dropped behind a quit.
    #[display("the game actor is no longer running")]
    Closed,
    /// No reply arrived within [`REPLY_TIMEOUT`].
    #[display("timed out waiting for the game actor")]
    Timeout,
}

/// A one-shot reply that will be fulfilled by the actor worker.
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Pending<T> {
    fn closed() -> Self {
        let (_, rx) = oneshot::channel();
        Self { rx }
    }

    /// Waits for the reply with a bounded timeout.
    ///
    /// # Errors
    ///
    /// Fails with [`ActorError::Closed`] when the worker dropped the reply
    /// channel, or [`ActorError::Timeout`] after [`REPLY_TIMEOUT`].
    pub async fn wait(self) -> Result<T, ActorError> {
        match tokio::time::timeout(REPLY_TIMEOUT, self.rx).await {
            Err(_) => Err(ActorError::Timeout),
            Ok(Err(_)) => Err(ActorError::Closed),
            Ok(Ok(value)) => Ok(value),
        }
    }
}

/// Pending automated-move reply channels, keyed by request token.
///
/// The handle registers a sender here before enqueuing the matching
/// [`Command::EngineMove`]; the worker removes it in O(1) when the command
/// arrives. No request of the same kind can consume another's channel.
pub(crate) type EngineReplies = Arc<Mutex<HashMap<RequestToken, oneshot::Sender<MoveReply>>>>;

/// Clonable, thread-safe handle to a running game actor.
#[derive(Debug, Clone)]
pub struct GameHandle {
    commands: mpsc::UnboundedSender<Command>,
    engine_replies: EngineReplies,
    next_token: Arc<AtomicU64>,
}

impl GameHandle {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<Command>,
        engine_replies: EngineReplies,
    ) -> Self {
        Self {
            commands,
            engine_replies,
            next_token: Arc::new(AtomicU64::new(0)),
        }
    }

    fn enqueue<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Pending<T> {
        let (tx, rx) = oneshot::channel();
        match self.commands.send(build(tx)) {
            Ok(()) => Pending { rx },
            // Sender was consumed by the failed send; hand back a channel
            // that reports Closed.
            Err(_) => Pending::closed(),
        }
    }

    /// Places a stone for the human-controlled side.
    pub fn submit_move(&self, row: usize, col: usize) -> Pending<MoveReply> {
        self.enqueue(|reply| Command::MakeMove { row, col, reply })
    }

    /// Undoes the latest move (two plies under automated play).
    pub fn undo(&self) -> Pending<usize> {
        self.enqueue(|reply| Command::Undo { reply })
    }

    /// Replaces the game with a fresh one of the given dimensions.
    pub fn new_game(&self, rows: usize, cols: usize) -> Pending<()> {
        self.enqueue(|reply| Command::NewGame { rows, cols, reply })
    }

    /// Saves the game to `path`.
    pub fn save(&self, path: impl Into<PathBuf>) -> Pending<Result<(), CodecError>> {
        let path = path.into();
        self.enqueue(|reply| Command::Save { path, reply })
    }

    /// Loads the game from `path`, replacing the current one on success.
    pub fn load(&self, path: impl Into<PathBuf>) -> Pending<Result<(), CodecError>> {
        let path = path.into();
        self.enqueue(|reply| Command::Load { path, reply })
    }

    /// Copies out the board.
    pub fn board(&self) -> Pending<Board> {
        self.enqueue(|reply| Command::QueryBoard { reply })
    }

    /// Copies out the full game state.
    pub fn snapshot(&self) -> Pending<GameSnapshot> {
        self.enqueue(|reply| Command::QuerySnapshot { reply })
    }

    /// Asks the automated opponent to move.
    ///
    /// The reply channel is registered on the token table before the command
    /// is enqueued, so interleaved requests of the same kind stay correlated
    /// with their own callers.
    pub fn request_engine_move(&self) -> Pending<MoveReply> {
        let (tx, rx) = oneshot::channel();
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        self.engine_replies.lock().unwrap().insert(token, tx);
        if self.commands.send(Command::EngineMove { token }).is_err() {
            self.engine_replies.lock().unwrap().remove(&token);
            return Pending::closed();
        }
        Pending { rx }
    }

    /// Swaps player names and the automated seat.
    pub fn reverse_sides(&self) -> Pending<EngineStatus> {
        self.enqueue(|reply| Command::ReverseSides { reply })
    }

    /// Renames one player.
    pub fn set_name(&self, side: Side, name: impl Into<String>) -> Pending<()> {
        let name = name.into();
        self.enqueue(|reply| Command::SetName { side, name, reply })
    }

    /// Changes which side the automated opponent drives.
    pub fn set_engine_status(&self, status: EngineStatus) -> Pending<()> {
        self.enqueue(|reply| Command::SetEngineStatus { status, reply })
    }

    /// Stops the worker after the commands already queued ahead of this one.
    pub fn quit(&self) {
        let _ = self.commands.send(Command::Quit);
    }
}
