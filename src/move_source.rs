//! Pluggable move sources for the automated opponent.
//!
//! The contract is deliberately small: given the current position, produce
//! one legal empty cell. A real search algorithm can replace [`RandomSource`]
//! without changing anything below it.

use crate::game::RuleEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Produces moves for the automated opponent.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Picks one currently-empty cell for the side on move, or `None` when
    /// the board has no vacant cell left.
    async fn pick(&mut self, engine: &RuleEngine) -> Option<(usize, usize)>;

    /// Display name of this source.
    fn name(&self) -> &str;
}

/// Baseline source: a uniformly random vacant cell.
///
/// Deterministic modulo its seed, which makes automated games reproducible
/// in tests.
pub struct RandomSource {
    rng: StdRng,
    name: String,
}

impl RandomSource {
    /// Creates a source seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            name: "Random".to_string(),
        }
    }

    /// Creates a source with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MoveSource for RandomSource {
    async fn pick(&mut self, engine: &RuleEngine) -> Option<(usize, usize)> {
        let vacancies = engine.vacancies();
        if vacancies.is_empty() {
            return None;
        }
        let choice = vacancies[self.rng.random_range(0..vacancies.len())];
        debug!(row = choice.0, col = choice.1, "random source picked");
        Some(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn picks_a_vacant_cell() {
        let engine = RuleEngine::new(3, 3);
        let mut source = RandomSource::seeded(7);
        let (row, col) = source.pick(&engine).await.unwrap();
        assert!(engine.is_vacant(row, col));
    }

    #[tokio::test]
    async fn full_board_yields_none() {
        use crate::game::Side;
        let mut engine = RuleEngine::new(1, 2);
        engine.apply_move(0, 0, Side::Sente).unwrap();
        engine.apply_move(0, 1, Side::Gote).unwrap();
        let mut source = RandomSource::seeded(7);
        assert_eq!(source.pick(&engine).await, None);
    }

    #[tokio::test]
    async fn seeded_sources_agree() {
        let engine = RuleEngine::standard();
        let mut a = RandomSource::seeded(42);
        let mut b = RandomSource::seeded(42);
        assert_eq!(a.pick(&engine).await, b.pick(&engine).await);
    }
}
