//! Renju rule engine with an actor-based game backend.
//!
//! # Architecture
//!
//! - **Grid**: generic bounds-checked 2-D container
//! - **Game**: domain types, line-scanning rules, and the rule engine that
//!   arbitrates moves (win detection, forbidden moves, undo)
//! - **Actor**: a single worker owning the engine, fed by an ordered command
//!   queue; callers get asynchronously fulfilled reply handles
//! - **Move source**: pluggable automated opponent
//! - **Codec**: line-oriented save-file format
//!
//! # Example
//!
//! ```no_run
//! use renju::actor::GameActor;
//! use renju::game::RuleEngine;
//! use renju::move_source::RandomSource;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (handle, _worker) = GameActor::spawn(
//!     RuleEngine::standard(),
//!     Box::new(RandomSource::new()),
//! );
//! let outcome = handle.submit_move(7, 7).wait().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod actor;
pub mod codec;
pub mod game;
pub mod grid;
pub mod move_source;

// Crate-level exports - concurrency core
pub use actor::{ActorError, GameActor, GameHandle, MoveReply, Pending};

// Crate-level exports - persistence
pub use codec::{sanitize_filename, CodecError};

// Crate-level exports - game domain
pub use game::{
    EngineStatus, ForbiddenPolicy, GameSnapshot, InvariantError, Move, MoveError, MoveOutcome,
    RuleEngine, Side, Square, Violation, STANDARD_SIZE,
};

// Crate-level exports - containers and move sources
pub use grid::{Grid, GridError};
pub use move_source::{MoveSource, RandomSource};
