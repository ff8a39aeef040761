//! Game domain: types, rules, and the rule engine.

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{GameSnapshot, RuleEngine, STANDARD_SIZE};
pub use types::{
    EngineStatus, ForbiddenPolicy, InvariantError, Move, MoveError, MoveOutcome, Side, Square,
    Violation,
};
