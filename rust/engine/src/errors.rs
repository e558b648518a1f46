use thiserror::Error;

use crate::player::{Action, Position};

/// Errors raised by the engine. Every variant is a precondition violation or a
/// failure reported by a strategy; none of them leaves a round half-updated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid number of cards: {actual} (expected {expected})")]
    InvalidCardCount { expected: String, actual: usize },
    #[error("Best combination requested before any community card was dealt")]
    NoCommunityCards,
    #[error("Need at least 5 cards to build a combination, got {0}")]
    NotEnoughCards(usize),
    #[error("Action {action} is not legal here (legal: {legal:?})")]
    IllegalAction { action: Action, legal: Vec<Action> },
    #[error("Invalid bet amount: {amount}, minimum: {minimum}, maximum: {maximum}")]
    InvalidBetAmount {
        amount: u32,
        minimum: u32,
        maximum: u32,
    },
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Hand already started")]
    HandAlreadyStarted,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Not the hero's turn: {0} is to act")]
    NotYourTurn(Position),
    #[error("Action trail {0:?} is not in the trail table")]
    UnknownActionTrail(String),
    #[error("Strategy failed: {0}")]
    Strategy(String),
}
