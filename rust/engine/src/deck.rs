use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Cards needed for one heads-up hand: 2 + 2 hole cards, 3 + 1 + 1 board.
pub const CARDS_PER_HAND: usize = 9;

/// A 52-card source that samples without replacement on every deal.
///
/// The deck keeps no memory of what it handed out: each [`Deck::deal_cards`]
/// call draws from the complete 52 cards, so callers take everything a hand
/// needs in a single call.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    /// Draws `n` distinct cards uniformly at random.
    pub fn deal_cards(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n == 0 || n > self.cards.len() {
            return Err(GameError::InvalidCardCount {
                expected: format!("1..={}", self.cards.len()),
                actual: n,
            });
        }
        let picked = sample(&mut self.rng, self.cards.len(), n);
        Ok(picked.into_iter().map(|i| self.cards[i]).collect())
    }

    /// Draws the nine cards of a heads-up hand.
    pub fn deal_hand(&mut self) -> Result<[Card; CARDS_PER_HAND], GameError> {
        let cards = self.deal_cards(CARDS_PER_HAND)?;
        let actual = cards.len();
        cards.try_into().map_err(|_| GameError::InvalidCardCount {
            expected: CARDS_PER_HAND.to_string(),
            actual,
        })
    }

    /// The full deck minus `visible`.
    pub fn remaining_cards(&self, visible: &[Card]) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|c| !visible.contains(c))
            .copied()
            .collect()
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }
}
