//! Rule-based strategies: the fish and the two win-rate threshold players.

use hupoker_engine::equity::estimate_win_rate;
use hupoker_engine::errors::GameError;
use hupoker_engine::player::{Action, DecisionContext, Strategy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::chart::preflop_win_probability;

/// Samples used by [`StrengthHandPlayer`] once community cards are out.
pub const DEFAULT_SIMULATIONS: u32 = 1000;

/// Picks the first of `preferred` that is legal.
fn first_legal(legal: &[Action], preferred: &[Action]) -> Option<Action> {
    preferred.iter().copied().find(|a| legal.contains(a))
}

/// Threshold policy shared by the starting-hand and strength players.
///
/// Below 0.5 the player checks or folds. Below `aggressive_from` it calls or
/// bets, otherwise it raises or bets. Facing only call/fold it calls; facing
/// only all-in/fold it shoves.
pub fn threshold_policy(p: f64, aggressive_from: f64, legal: &[Action]) -> Result<Action, GameError> {
    let preferred: &[Action] = if p < 0.5 {
        &[Action::Check, Action::Fold]
    } else if p < aggressive_from {
        &[Action::Call, Action::Bet, Action::AllIn]
    } else {
        &[Action::Raise, Action::Bet, Action::Call, Action::AllIn]
    };
    first_legal(legal, preferred)
        .ok_or_else(|| GameError::Strategy(format!("no policy action among {:?}", legal)))
}

/// Never folds: checks when it can, otherwise calls, otherwise shoves.
#[derive(Debug, Clone, Default)]
pub struct FishPlayer;

impl Strategy for FishPlayer {
    fn name(&self) -> &str {
        "fish"
    }

    fn decide(&mut self, legal: &[Action], ctx: &DecisionContext) -> Result<Action, GameError> {
        let choice = first_legal(legal, &[Action::Check, Action::Call, Action::AllIn])
            .ok_or_else(|| GameError::Strategy(format!("fish cannot act among {:?}", legal)))?;
        debug!(position = %ctx.position, stack = ctx.stack, %choice, "fish decision");
        Ok(choice)
    }
}

/// Plays every street off the strength of its two hole cards.
#[derive(Debug, Clone, Default)]
pub struct StartingHandPlayer;

impl Strategy for StartingHandPlayer {
    fn name(&self) -> &str {
        "starting-hand"
    }

    fn decide(&mut self, legal: &[Action], ctx: &DecisionContext) -> Result<Action, GameError> {
        let p = preflop_win_probability(ctx.hole_cards);
        let choice = threshold_policy(p, 0.6, legal)?;
        debug!(p, street = %ctx.street, %choice, "starting-hand decision");
        Ok(choice)
    }
}

/// Uses the pre-flop chart before the flop and a Monte Carlo win rate after.
#[derive(Debug, Clone)]
pub struct StrengthHandPlayer {
    rng: ChaCha20Rng,
    simulations: u32,
}

impl StrengthHandPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            simulations: DEFAULT_SIMULATIONS,
        }
    }

    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations;
        self
    }

    fn win_probability(&mut self, ctx: &DecisionContext) -> Result<f64, GameError> {
        if ctx.community_cards.is_empty() {
            return Ok(preflop_win_probability(ctx.hole_cards));
        }
        estimate_win_rate(
            self.simulations,
            ctx.hole_cards,
            &ctx.community_cards,
            &mut self.rng,
        )
    }
}

impl Strategy for StrengthHandPlayer {
    fn name(&self) -> &str {
        "strength"
    }

    fn decide(&mut self, legal: &[Action], ctx: &DecisionContext) -> Result<Action, GameError> {
        let p = self.win_probability(ctx)?;
        let choice = threshold_policy(p, 0.8, legal)?;
        debug!(p, street = %ctx.street, %choice, "strength decision");
        Ok(choice)
    }
}
