use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::Action;
use crate::round::Street;

/// Number of actions in a street after which fixed-limit betting is capped.
pub const FIXED_LIMIT_BET_CAP: u32 = 4;

/// Betting structure of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BettingLimit {
    /// Bets and raises come in fixed units and are capped per street.
    #[default]
    FixedLimit,
    /// Bets and raises may be any size up to the stack.
    NoLimit,
}

impl BettingLimit {
    pub fn is_fixed(self) -> bool {
        matches!(self, BettingLimit::FixedLimit)
    }
}

impl fmt::Display for BettingLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BettingLimit::FixedLimit => write!(f, "Fixed Limit Texas Hold'em"),
            BettingLimit::NoLimit => write!(f, "No Limit Texas Hold'em"),
        }
    }
}

/// Everything [`legal_actions`] needs to know about the seat on turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BettingContext {
    /// Chips the acting player must add to match the opponent.
    pub imbalance: u32,
    /// Acting player's remaining stack.
    pub stack: u32,
    /// Whether either player is already all-in this hand.
    pub someone_all_in: bool,
    pub limit: BettingLimit,
    /// Actions already taken in the current street.
    pub actions_this_street: u32,
}

/// Derives the set of legal actions for the player on turn.
///
/// The table, first match applies:
///
/// | situation                                         | legal                 |
/// |---------------------------------------------------|-----------------------|
/// | imbalance > 0, imbalance >= stack                 | all-in, fold          |
/// | imbalance > 0, someone already all-in             | call, fold            |
/// | imbalance > 0, fixed limit, cap reached           | call, fold            |
/// | imbalance > 0                                     | call, raise, fold     |
/// | imbalance == 0                                    | check, bet            |
///
/// # Examples
///
/// ```
/// use hupoker_engine::player::Action;
/// use hupoker_engine::rules::{legal_actions, BettingContext, BettingLimit};
///
/// let ctx = BettingContext {
///     imbalance: 5,
///     stack: 95,
///     someone_all_in: false,
///     limit: BettingLimit::FixedLimit,
///     actions_this_street: 0,
/// };
/// assert_eq!(legal_actions(&ctx), vec![Action::Call, Action::Raise, Action::Fold]);
///
/// // Facing more than the stack leaves only the shove or the fold.
/// let short = BettingContext { imbalance: 40, stack: 30, ..ctx };
/// assert_eq!(legal_actions(&short), vec![Action::AllIn, Action::Fold]);
/// ```
pub fn legal_actions(ctx: &BettingContext) -> Vec<Action> {
    if ctx.imbalance == 0 {
        return vec![Action::Check, Action::Bet];
    }
    if ctx.imbalance >= ctx.stack {
        vec![Action::AllIn, Action::Fold]
    } else if ctx.someone_all_in
        || (ctx.limit.is_fixed() && ctx.actions_this_street >= FIXED_LIMIT_BET_CAP)
    {
        vec![Action::Call, Action::Fold]
    } else {
        vec![Action::Call, Action::Raise, Action::Fold]
    }
}

/// Smallest total a raise may put in: the call plus one more unit of
/// `max(imbalance, big_blind)`, limited by what the stack holds beyond the call.
///
/// ```
/// use hupoker_engine::rules::min_raise;
///
/// assert_eq!(min_raise(5, 10, 95), 15);
/// assert_eq!(min_raise(30, 10, 200), 60);
/// assert_eq!(min_raise(30, 10, 45), 45);
/// ```
pub fn min_raise(imbalance: u32, big_blind: u32, stack: u32) -> u32 {
    imbalance + imbalance.max(big_blind).min(stack.saturating_sub(imbalance))
}

/// Fixed-limit bet unit: one big blind on the first two streets, two after.
pub fn fixed_bet_size(street: Street, big_blind: u32, stack: u32) -> u32 {
    let unit = match street {
        Street::PreFlop | Street::Flop => big_blind,
        Street::Turn | Street::River | Street::Showdown => 2 * big_blind,
    };
    unit.min(stack)
}

/// Rejects a strategy-chosen amount outside `[minimum, maximum]`.
pub fn validate_amount(amount: u32, minimum: u32, maximum: u32) -> Result<u32, GameError> {
    if amount < minimum || amount > maximum {
        return Err(GameError::InvalidBetAmount {
            amount,
            minimum,
            maximum,
        });
    }
    Ok(amount)
}
