//! Pre-flop starting-hand chart.
//!
//! Hands are first scored on a 0-10 scale, then mapped to an approximate
//! heads-up probability of beating a random hand at showdown.

use hupoker_engine::cards::Card;

/// Score a starting hand on a scale of 0-10.
///
/// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
/// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
/// - 5-6: Medium hands (88-77, AJ, suited broadways)
/// - 3-4: Marginal hands (66-22, Ax, suited connectors)
/// - 0-2: Weak hands (offsuit low cards)
pub fn preflop_strength(hole_cards: [Card; 2]) -> u8 {
    let r1 = hole_cards[0].rank.value();
    let r2 = hole_cards[1].rank.value();
    let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
    let suited = hole_cards[0].suit == hole_cards[1].suit;

    if high == low {
        return match high {
            13..=14 => 10,
            11..=12 => 9,
            10 => 8,
            9 => 7,
            8 => 6,
            7 => 5,
            _ => 4,
        };
    }

    // (offsuit, suited) scores for the named combinations
    let (offsuit, suited_score) = match (high, low) {
        (14, 13) => (8, 10),
        (14, 12) => (7, 8),
        (14, 11) => (6, 7),
        (14, 10) => (5, 6),
        (14, _) => (4, 5),
        (13, 12) => (6, 7),
        (13, 11) => (5, 6),
        (13, 10) => (4, 5),
        (12, 11) => (5, 6),
        (12, 10) => (4, 5),
        _ if high - low <= 2 => (2, if high >= 9 { 5 } else { 4 }),
        _ if high >= 11 && low >= 9 => (4, 4),
        _ => (2, 2),
    };
    if suited { suited_score } else { offsuit }
}

/// Approximate probability that `hole_cards` wins or ties against one random
/// hand: 0.32 for the weakest scores up to 0.85 for aces and kings.
pub fn preflop_win_probability(hole_cards: [Card; 2]) -> f64 {
    0.32 + 0.053 * f64::from(preflop_strength(hole_cards))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hupoker_engine::cards::parse_cards;

    fn hole(s: &str) -> [Card; 2] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1]]
    }

    #[test]
    fn premium_pairs() {
        assert_eq!(preflop_strength(hole("Ah As")), 10);
        assert_eq!(preflop_strength(hole("Kh Ks")), 10);
        assert_eq!(preflop_strength(hole("2h 2s")), 4);
    }

    #[test]
    fn ace_king_suitedness() {
        assert_eq!(preflop_strength(hole("Ah Kh")), 10);
        assert_eq!(preflop_strength(hole("Kd Ah")), 8);
    }

    #[test]
    fn weak_offsuit() {
        assert_eq!(preflop_strength(hole("7c 2d")), 2);
        assert!(preflop_win_probability(hole("7c 2d")) < 0.5);
    }

    #[test]
    fn probabilities_are_ordered() {
        let aces = preflop_win_probability(hole("Ah As"));
        let tens = preflop_win_probability(hole("Th Ts"));
        let junk = preflop_win_probability(hole("8c 3d"));
        assert!(aces > tens && tens > junk);
        assert!(aces <= 0.86);
    }
}
