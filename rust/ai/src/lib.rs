//! # hupoker-ai: Strategies for the heads-up engine
//!
//! Concrete [`Strategy`] implementations that can sit in either seat of a
//! [`hupoker_engine::round::BettingRound`].
//!
//! ## Core Components
//!
//! - [`random`] - Uniform random actions and sizes
//! - [`fixed_policy`] - Fish, starting-hand and strength threshold players
//! - [`chart`] - Pre-flop starting-hand chart
//! - [`create_ai`] - Factory for creating strategies by name
//!
//! ## Quick Start
//!
//! ```rust
//! use hupoker_ai::create_ai;
//!
//! let ai = create_ai("fish", Some(42)).unwrap();
//! assert_eq!(ai.name(), "fish");
//! assert!(create_ai("oracle", None).is_err());
//! ```

use hupoker_engine::player::Strategy;
use thiserror::Error;

pub mod chart;
pub mod fixed_policy;
pub mod random;

/// Names accepted by [`create_ai`].
pub const AVAILABLE_AIS: [&str; 4] = ["random", "fish", "starting-hand", "strength"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown AI type: {name} (available: {})", AVAILABLE_AIS.join(", "))]
    UnknownAi { name: String },
}

pub fn available_ais() -> &'static [&'static str] {
    &AVAILABLE_AIS
}

/// Builds a strategy by name.
///
/// `seed` makes the random and Monte Carlo players reproducible; `None`
/// seeds them from the OS.
///
/// # Errors
///
/// [`AiError::UnknownAi`] for any name outside [`AVAILABLE_AIS`].
pub fn create_ai(name: &str, seed: Option<u64>) -> Result<Box<dyn Strategy>, AiError> {
    let seed_or_entropy = || seed.unwrap_or_else(rand::random);
    let ai: Box<dyn Strategy> = match name.trim().to_ascii_lowercase().as_str() {
        "random" => Box::new(match seed {
            Some(s) => random::RandomPlayer::new(s),
            None => random::RandomPlayer::from_entropy(),
        }),
        "fish" => Box::new(fixed_policy::FishPlayer),
        "starting-hand" => Box::new(fixed_policy::StartingHandPlayer),
        "strength" => Box::new(fixed_policy::StrengthHandPlayer::new(seed_or_entropy())),
        _ => {
            return Err(AiError::UnknownAi {
                name: name.to_string(),
            });
        }
    };
    Ok(ai)
}
