use hupoker_engine::errors::GameError;
use hupoker_engine::player::{Action, DecisionContext, Strategy};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// Picks uniformly among the legal actions and sizes uniformly in bounds.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }
}

impl Strategy for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, legal: &[Action], ctx: &DecisionContext) -> Result<Action, GameError> {
        let choice = legal
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| GameError::Strategy("no legal action to pick from".to_string()))?;
        debug!(position = %ctx.position, %choice, "random decision");
        Ok(choice)
    }

    fn choose_amount(&mut self, minimum: u32, maximum: u32, _pot: u32) -> Result<u32, GameError> {
        if minimum > maximum {
            return Err(GameError::InvalidBetAmount {
                amount: minimum,
                minimum,
                maximum,
            });
        }
        Ok(self.rng.random_range(minimum..=maximum))
    }
}
