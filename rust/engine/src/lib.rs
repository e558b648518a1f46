//! # hupoker-engine: Heads-Up Hold'em Core
//!
//! A deterministic heads-up Texas Hold'em engine. It deals hands, enforces
//! fixed-limit and no-limit betting across the four streets, keeps exact chip
//! accounting (including refunds for under-called all-ins) and settles
//! showdowns with a 5-card evaluator. Every hand is exposed as a step-wise
//! state machine so it can be driven by a human, a scripted strategy or a
//! learning loop.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seedable ChaCha20 dealing without replacement
//! - [`hand`] - 5-card classification, tie-breaking and best-of-7 search
//! - [`equity`] - Monte Carlo win-rate estimation
//! - [`rules`] - Legal-action table and bet sizing
//! - [`player`] - Seats, chip movements and the [`player::Strategy`] trait
//! - [`trail`] - Integer codes for per-street action trails
//! - [`round`] - The per-hand betting state machine
//! - [`game`] - Multi-hand heads-up orchestration
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use hupoker_engine::cards::parse_cards;
//! use hupoker_engine::hand::{best_combination, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let (_, strength) = best_combination(&cards).unwrap();
//! assert_eq!(strength.category, Category::StraightFlush);
//! assert_eq!(strength.tiebreaker, vec![14]);
//! ```
//!
//! ## Driving a hand
//!
//! The hero acts through [`round::BettingRound::step`]; the villain's
//! [`player::Strategy`] is consulted automatically whenever it is on turn.
//!
//! ```rust
//! use hupoker_engine::cards::parse_cards;
//! use hupoker_engine::errors::GameError;
//! use hupoker_engine::player::{Action, DecisionContext, Player, Position, Strategy};
//! use hupoker_engine::round::{BettingRound, HandConfig};
//! use hupoker_engine::rules::BettingLimit;
//!
//! struct AlwaysFirst;
//!
//! impl Strategy for AlwaysFirst {
//!     fn name(&self) -> &str {
//!         "first"
//!     }
//!     fn decide(&mut self, legal: &[Action], _: &DecisionContext) -> Result<Action, GameError> {
//!         Ok(legal[0])
//!     }
//! }
//!
//! let cards = parse_cards("Ac Ad 7c 2d Kh 9s 4c 3d 8h").unwrap();
//! let config = HandConfig { big_blind: 10, limit: BettingLimit::FixedLimit, hand_number: 1 };
//! let mut round = BettingRound::new(
//!     Position::Button,
//!     [
//!         Player::new("hero", 100, Box::new(AlwaysFirst)),
//!         Player::new("villain", 100, Box::new(AlwaysFirst)),
//!     ],
//!     config,
//!     cards.try_into().unwrap(),
//! );
//!
//! let first = round.initial_step().unwrap();
//! assert_eq!(first.state.pot, 15);
//! let done = round.step(Action::Fold).unwrap();
//! assert!(done.hand_over);
//! assert_eq!(done.reward, -5);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All dealing is reproducible using seeded RNG:
//!
//! ```rust
//! use hupoker_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! assert_eq!(deck1.deal_hand().unwrap(), deck2.deal_hand().unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod equity;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod round;
pub mod rules;
pub mod trail;
