//! The game actor: a single worker that owns the rule engine outright.
//!
//! All game-state mutation is serialized through one ordered command queue.
//! Callers interact through a [`GameHandle`], which enqueues commands and
//! returns asynchronously fulfilled reply handles; the worker executes
//! commands strictly in submission order, so every operation (reads
//! included) observes a linearizable history without any lock on the game
//! state itself. Nothing outside the worker ever sees a live reference to
//! the engine, only by-value snapshots handed back through reply channels.

mod command;
mod handle;

pub use command::{Command, MoveReply, RequestToken};
pub use handle::{ActorError, GameHandle, Pending, REPLY_TIMEOUT};

use crate::codec;
use crate::game::{InvariantError, MoveError, RuleEngine};
use crate::move_source::MoveSource;
use handle::EngineReplies;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// The worker state: engine, move source, queue end, and reply table.
pub struct GameActor {
    commands: mpsc::UnboundedReceiver<Command>,
    engine_replies: EngineReplies,
    handle: GameHandle,
    engine: RuleEngine,
    source: Box<dyn MoveSource>,
}

impl GameActor {
    /// Spawns the actor worker.
    ///
    /// Returns the caller-facing handle and the worker's join handle. The
    /// worker resolves to an error only on an invariant violation, which it
    /// logs at the highest severity before terminating.
    pub fn spawn(
        engine: RuleEngine,
        source: Box<dyn MoveSource>,
    ) -> (GameHandle, JoinHandle<Result<(), InvariantError>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine_replies = EngineReplies::default();
        let handle = GameHandle::new(tx, engine_replies.clone());
        let actor = Self {
            commands: rx,
            engine_replies,
            handle: handle.clone(),
            engine,
            source,
        };
        let join = tokio::spawn(actor.run());
        (handle, join)
    }

    async fn run(mut self) -> Result<(), InvariantError> {
        info!(source = self.source.name(), "game actor started");
        let result = self.serve().await;
        if let Err(violation) = &result {
            error!(%violation, "game actor terminating on invariant violation");
        } else {
            info!("game actor stopped");
        }
        result
    }

    async fn serve(&mut self) -> Result<(), InvariantError> {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Quit => {
                    debug!("quit accepted");
                    break;
                }
                command => self.execute(command).await?,
            }
        }
        // Anything still queued behind the quit is dropped here; those
        // callers observe a closed reply channel.
        self.commands.close();
        Ok(())
    }

    #[instrument(skip(self, command))]
    async fn execute(&mut self, command: Command) -> Result<(), InvariantError> {
        match command {
            Command::MakeMove { row, col, reply } => {
                // The human path differs from the automated path only in
                // which color is expected to move.
                let side = match self.engine.engine_status().side() {
                    Some(engine_side) => engine_side.opponent(),
                    None => self.engine.side_to_move(),
                };
                let _ = reply.send(self.engine.apply_move(row, col, side));
            }
            Command::Undo { reply } => {
                let undone = self.engine.undo()?;
                let _ = reply.send(undone);
            }
            Command::NewGame { rows, cols, reply } => {
                self.engine.clear(rows, cols);
                let _ = reply.send(());
            }
            Command::Save { path, reply } => {
                // The snapshot is fetched through the queue by a detached
                // task, so serialization never races the worker.
                let handle = self.handle.clone();
                tokio::spawn(async move {
                    match handle.snapshot().wait().await {
                        Ok(snapshot) => {
                            let _ = reply.send(codec::save_to_path(&snapshot, &path));
                        }
                        Err(failure) => {
                            warn!(%failure, "save aborted: snapshot request failed");
                        }
                    }
                });
            }
            Command::Load { path, reply } => match codec::load_from_path(&path) {
                Ok(snapshot) => {
                    self.engine = RuleEngine::from_snapshot(snapshot, self.engine.policy());
                    let _ = reply.send(Ok(()));
                    // A loaded position may put the automated side on move;
                    // nudge it so play does not stall waiting for a human
                    // who is not on move.
                    if self.engine.engine_status().side() == Some(self.engine.side_to_move()) {
                        self.nudge_engine();
                    }
                }
                Err(failure) => {
                    let _ = reply.send(Err(failure));
                }
            },
            Command::QueryBoard { reply } => {
                let _ = reply.send(self.engine.board().clone());
            }
            Command::QuerySnapshot { reply } => {
                let _ = reply.send(self.engine.snapshot()?);
            }
            Command::EngineMove { token } => {
                let reply = self
                    .engine_replies
                    .lock()
                    .unwrap()
                    .remove(&token)
                    .ok_or(InvariantError::LostCorrelation { token })?;
                let _ = reply.send(self.engine_move().await);
            }
            Command::ReverseSides { reply } => {
                let _ = reply.send(self.engine.reverse_sides());
            }
            Command::SetName { side, name, reply } => {
                self.engine.set_name(side, name);
                let _ = reply.send(());
            }
            Command::SetEngineStatus { status, reply } => {
                self.engine.set_engine_status(status);
                let _ = reply.send(());
            }
            Command::Quit => {}
        }
        Ok(())
    }

    async fn engine_move(&mut self) -> MoveReply {
        let Some(side) = self.engine.engine_status().side() else {
            return Err(MoveError::EngineDisabled);
        };
        match self.source.pick(&self.engine).await {
            None => Err(MoveError::BoardFull),
            Some((row, col)) => self.engine.apply_move(row, col, side),
        }
    }

    /// Fires an automated-move request at our own queue and logs its
    /// eventual outcome from a detached task.
    fn nudge_engine(&self) {
        let pending = self.handle.request_engine_move();
        tokio::spawn(async move {
            match pending.wait().await {
                Ok(Ok(outcome)) => debug!(?outcome, "automated reply applied"),
                Ok(Err(rejection)) => warn!(%rejection, "automated reply rejected"),
                Err(failure) => warn!(%failure, "automated reply failed"),
            }
        });
    }
}
