use rand::seq::index::sample;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;
use crate::hand::{best_combination, compare_hands};

/// Monte Carlo estimate of how often `hole_cards` wins or ties against one
/// random opponent hand, given the community cards seen so far.
///
/// Each sample completes the board and draws two opponent cards from the
/// cards not already visible. Ties count as wins.
///
/// ```
/// use hupoker_engine::cards::parse_cards;
/// use hupoker_engine::equity::estimate_win_rate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let hole = parse_cards("Ah As").unwrap();
/// let mut rng = ChaCha20Rng::seed_from_u64(3);
/// let p = estimate_win_rate(500, [hole[0], hole[1]], &[], &mut rng).unwrap();
/// assert!(p > 0.75);
/// ```
pub fn estimate_win_rate<R: Rng + ?Sized>(
    nb_simulations: u32,
    hole_cards: [Card; 2],
    community_cards: &[Card],
    rng: &mut R,
) -> Result<f64, GameError> {
    if nb_simulations == 0 {
        return Err(GameError::InvalidCardCount {
            expected: "at least one simulation".to_string(),
            actual: 0,
        });
    }
    if community_cards.len() > 5 {
        return Err(GameError::InvalidCardCount {
            expected: "0..=5 community cards".to_string(),
            actual: community_cards.len(),
        });
    }
    let mut visible = hole_cards.to_vec();
    visible.extend_from_slice(community_cards);
    let remaining: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !visible.contains(c))
        .collect();
    let missing = 5 - community_cards.len();

    let mut wins = 0u32;
    let mut hero = Vec::with_capacity(7);
    let mut villain = Vec::with_capacity(7);
    for _ in 0..nb_simulations {
        let drawn: Vec<Card> = sample(rng, remaining.len(), missing + 2)
            .into_iter()
            .map(|i| remaining[i])
            .collect();
        let (board_fill, opponent) = drawn.split_at(missing);

        hero.clear();
        hero.extend_from_slice(&hole_cards);
        hero.extend_from_slice(community_cards);
        hero.extend_from_slice(board_fill);

        villain.clear();
        villain.extend_from_slice(opponent);
        villain.extend_from_slice(community_cards);
        villain.extend_from_slice(board_fill);

        let (_, mine) = best_combination(&hero)?;
        let (_, theirs) = best_combination(&villain)?;
        if compare_hands(&mine, &theirs).is_ge() {
            wins += 1;
        }
    }
    Ok(f64::from(wins) / f64::from(nb_simulations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn royal_flush_never_loses() {
        let hole = parse_cards("Ah Kh").unwrap();
        let board = parse_cards("Qh Jh Th 2c 3d").unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let p = estimate_win_rate(200, [hole[0], hole[1]], &board, &mut rng).unwrap();
        assert_eq!(p, 1.0);
    }

    #[test]
    fn seeded_runs_repeat() {
        let hole = parse_cards("7c 2d").unwrap();
        let a = estimate_win_rate(300, [hole[0], hole[1]], &[], &mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let b = estimate_win_rate(300, [hole[0], hole[1]], &[], &mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert!(a < 0.5);
    }

    #[test]
    fn rejects_bad_inputs() {
        let hole = parse_cards("7c 2d").unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        assert!(estimate_win_rate(0, [hole[0], hole[1]], &[], &mut rng).is_err());
        let six = parse_cards("2h 3h 4h 5h 6h 7h").unwrap();
        assert!(estimate_win_rate(10, [hole[0], hole[1]], &six, &mut rng).is_err());
    }
}
