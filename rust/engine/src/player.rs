use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::round::Street;

/// Represents a player's position at the table in heads-up poker.
/// Button posts the small blind, BigBlind posts the big blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Button position (small blind in heads-up, first to act pre-flop)
    Button,
    /// Big blind position (first to act on every post-flop street)
    BigBlind,
}

impl Position {
    /// Seat index used to address `[Player; 2]` arrays.
    pub fn index(self) -> usize {
        match self {
            Position::Button => 0,
            Position::BigBlind => 1,
        }
    }

    pub fn other(self) -> Position {
        match self {
            Position::Button => Position::BigBlind,
            Position::BigBlind => Position::Button,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Button => write!(f, "SB"),
            Position::BigBlind => write!(f, "BB"),
        }
    }
}

/// Represents a player action during a betting round.
///
/// Amounts are not part of the action: fixed-limit sizes are dictated by the
/// street, and no-limit sizes are asked from the acting [`Strategy`] through
/// [`Strategy::choose_amount`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Pass the turn without putting chips in (only when nothing is owed)
    Check,
    /// Open the betting on this street
    Bet,
    /// Match the outstanding imbalance
    Call,
    /// Match the imbalance and put more on top
    Raise,
    /// Give up the hand and the pot
    Fold,
    /// Push the whole remaining stack
    AllIn,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Check => "check",
            Action::Bet => "bet",
            Action::Call => "call",
            Action::Raise => "raise",
            Action::Fold => "fold",
            Action::AllIn => "all-in",
        }
    }

    /// Symbol appended to the street's action trail. An all-in that leaves
    /// the opponent something to call is recorded as `B` by the round instead.
    pub fn trail_symbol(self) -> char {
        match self {
            Action::Check | Action::Call | Action::AllIn => 'C',
            Action::Bet | Action::Raise => 'B',
            Action::Fold => 'F',
        }
    }

    pub fn all() -> [Action; 6] {
        [
            Action::Check,
            Action::Bet,
            Action::Call,
            Action::Raise,
            Action::Fold,
            Action::AllIn,
        ]
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Action::all()
            .into_iter()
            .find(|a| a.as_str() == needle)
            .ok_or_else(|| GameError::Strategy(format!("unknown action '{}'", s.trim())))
    }
}

/// Read-only view of the table handed to a [`Strategy`] when it is on turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionContext {
    pub street: Street,
    pub position: Position,
    pub stack: u32,
    pub opponent_stack: u32,
    pub pot: u32,
    pub imbalance: u32,
    pub big_blind: u32,
    pub hole_cards: [Card; 2],
    pub community_cards: Vec<Card>,
    /// Trail of the current street, e.g. `"CB"`.
    pub trail: String,
}

/// Decision-making capability consumed by the betting round.
///
/// The round never knows which concrete strategy sits behind a seat; it only
/// asks for an action among the legal ones and, in no-limit games, for a size.
pub trait Strategy {
    fn name(&self) -> &str;

    /// Pick one of `legal`. Returning anything else is rejected by the round.
    fn decide(&mut self, legal: &[Action], ctx: &DecisionContext) -> Result<Action, GameError>;

    /// Size a no-limit bet or raise within `[minimum, maximum]`.
    fn choose_amount(&mut self, minimum: u32, _maximum: u32, _pot: u32) -> Result<u32, GameError> {
        Ok(minimum)
    }
}

/// A seat at the table: chips plus the strategy that plays them.
pub struct Player {
    name: String,
    stack: u32,
    starting_stack: u32,
    strategy: Box<dyn Strategy>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("stack", &self.stack)
            .field("starting_stack", &self.starting_stack)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u32, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            stack,
            starting_stack: stack,
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }

    pub fn starting_stack(&self) -> u32 {
        self.starting_stack
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn strategy_mut(&mut self) -> &mut dyn Strategy {
        self.strategy.as_mut()
    }

    /// Moves chips from the stack towards the pot. Betting more than the stack
    /// empties it.
    pub fn bet_amount(&mut self, amount: u32) {
        self.stack = self.stack.saturating_sub(amount);
    }

    pub fn win_pot(&mut self, pot: u32) {
        self.stack = self.stack.saturating_add(pot);
    }

    /// Takes half of `pot`; an odd chip stays behind.
    pub fn split_pot(&mut self, pot: u32) {
        self.stack = self.stack.saturating_add(pot / 2);
    }

    /// Refund of an overpayment that the opponent could not match.
    pub fn get_back_from_pot(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn reset_stack(&mut self) {
        self.stack = self.starting_stack;
    }
}
