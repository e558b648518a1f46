use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::Card;
use crate::errors::GameError;

/// Hand categories, numbered 1 (high card) to 9 (straight flush).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl Category {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn human_readable(self) -> &'static str {
        match self {
            Category::HighCard => "High card",
            Category::OnePair => "One pair",
            Category::TwoPair => "Two pairs",
            Category::ThreeOfAKind => "Three of a kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full house",
            Category::FourOfAKind => "Four of a kind",
            Category::StraightFlush => "Straight flush",
        }
    }
}

/// Category plus the ordered tiebreaker used between hands of that category.
///
/// The derived ordering compares the category first, then the tiebreaker
/// lexicographically, which is exactly hand strength.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub tiebreaker: Vec<u8>,
}

pub type Combination = [Card; 5];

/// Classifies exactly five cards.
pub fn evaluate_combination(combo: &Combination) -> HandStrength {
    let mut counts: HashMap<u8, u8> = HashMap::new();
    for c in combo {
        *counts.entry(c.rank.value()).or_insert(0) += 1;
    }
    let flush = combo.iter().all(|c| c.suit == combo[0].suit);

    let mut distinct: Vec<u8> = counts.keys().copied().collect();
    distinct.sort_unstable();
    let wheel = distinct == [2, 3, 4, 5, 14];
    let straight = distinct.len() == 5 && (wheel || distinct[4] - distinct[0] == 4);

    // ranks by (count desc, rank desc)
    let mut grouped: Vec<(u8, u8)> = counts.iter().map(|(&r, &n)| (n, r)).collect();
    grouped.sort_unstable_by(|a, b| b.cmp(a));
    let by_count: Vec<u8> = grouped.iter().map(|&(_, r)| r).collect();
    let mut shape: Vec<u8> = grouped.iter().map(|&(n, _)| n).collect();
    shape.sort_unstable();

    let mut descending = distinct.clone();
    descending.reverse();
    let straight_high = if wheel { 5 } else { descending[0] };

    let (category, tiebreaker) = if straight && flush {
        (Category::StraightFlush, vec![straight_high])
    } else if shape == [1, 4] {
        (Category::FourOfAKind, by_count)
    } else if shape == [2, 3] {
        (Category::FullHouse, by_count)
    } else if flush {
        (Category::Flush, descending)
    } else if straight {
        (Category::Straight, vec![straight_high])
    } else if shape == [1, 1, 3] {
        (Category::ThreeOfAKind, by_count)
    } else if shape == [1, 2, 2] {
        (Category::TwoPair, by_count)
    } else if shape == [1, 1, 1, 2] {
        (Category::OnePair, by_count)
    } else {
        (Category::HighCard, descending)
    };
    HandStrength {
        category,
        tiebreaker,
    }
}

/// Picks the strongest candidate by walking the tiebreakers position by
/// position. Candidates that are still level after the last position are true
/// ties; the first one in input order wins.
pub fn tie_break(candidates: &[(Combination, HandStrength)]) -> Option<(Combination, HandStrength)> {
    let mut alive: Vec<&(Combination, HandStrength)> = candidates.iter().collect();
    let width = alive.iter().map(|(_, s)| s.tiebreaker.len()).max()?;
    for pos in 0..width {
        if alive.len() <= 1 {
            break;
        }
        let best = alive.iter().filter_map(|(_, s)| s.tiebreaker.get(pos)).max().copied();
        alive.retain(|(_, s)| s.tiebreaker.get(pos).copied() == best);
        trace!(pos, survivors = alive.len(), "tie-break pass");
    }
    alive.first().map(|&(combo, strength)| (*combo, strength.clone()))
}

/// Every 5-card subset of `cards`, in lexicographic index order.
pub fn combinations(cards: &[Card]) -> Vec<Combination> {
    let n = cards.len();
    let mut out = Vec::new();
    if n < 5 {
        return out;
    }
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        out.push([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
    out
}

/// Strongest 5-card combination among `cards`.
pub fn best_combination(cards: &[Card]) -> Result<(Combination, HandStrength), GameError> {
    if cards.len() < 5 {
        return Err(GameError::NotEnoughCards(cards.len()));
    }
    let scored: Vec<(Combination, HandStrength)> = combinations(cards)
        .into_iter()
        .map(|combo| {
            let strength = evaluate_combination(&combo);
            (combo, strength)
        })
        .collect();
    let top = scored
        .iter()
        .map(|(_, s)| s.category)
        .max()
        .ok_or(GameError::NotEnoughCards(cards.len()))?;
    let finalists: Vec<(Combination, HandStrength)> =
        scored.into_iter().filter(|(_, s)| s.category == top).collect();
    if finalists.len() == 1 {
        return Ok(finalists[0].clone());
    }
    tie_break(&finalists).ok_or(GameError::NotEnoughCards(cards.len()))
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

/// Outcome of a showdown between two hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Winner {
    Hand1,
    Hand2,
    Draw,
}

/// One player's cards for a single hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    private_cards: [Card; 2],
    public_cards: Vec<Card>,
    best: Option<(Combination, HandStrength)>,
}

impl Hand {
    pub fn new(private_cards: [Card; 2]) -> Self {
        Self {
            private_cards,
            public_cards: Vec::with_capacity(5),
            best: None,
        }
    }

    pub fn private_cards(&self) -> [Card; 2] {
        self.private_cards
    }

    pub fn public_cards(&self) -> &[Card] {
        &self.public_cards
    }

    pub fn add_public_cards(&mut self, cards: &[Card]) {
        self.public_cards.extend_from_slice(cards);
    }

    pub fn update_best_combination(&mut self) -> Result<(), GameError> {
        if self.public_cards.is_empty() {
            return Err(GameError::NoCommunityCards);
        }
        let mut all: Vec<Card> = self.private_cards.to_vec();
        all.extend_from_slice(&self.public_cards);
        self.best = Some(best_combination(&all)?);
        Ok(())
    }

    pub fn strength(&self) -> Option<&HandStrength> {
        self.best.as_ref().map(|(_, s)| s)
    }

    pub fn best_rank(&self) -> Option<u8> {
        self.strength().map(|s| s.category.rank())
    }

    pub fn best_combination(&self) -> Option<&Combination> {
        self.best.as_ref().map(|(c, _)| c)
    }

    pub fn best_tiebreaker(&self) -> Option<&[u8]> {
        self.strength().map(|s| s.tiebreaker.as_slice())
    }

    pub fn human_readable_rank(&self) -> Option<&'static str> {
        self.strength().map(|s| s.category.human_readable())
    }
}

/// Compares two hands whose best combinations are up to date.
pub fn compare_two_hands(hand1: &Hand, hand2: &Hand) -> Result<Winner, GameError> {
    let a = hand1.strength().ok_or(GameError::NoCommunityCards)?;
    let b = hand2.strength().ok_or(GameError::NoCommunityCards)?;
    Ok(match compare_hands(a, b) {
        Ordering::Greater => Winner::Hand1,
        Ordering::Less => Winner::Hand2,
        Ordering::Equal => Winner::Draw,
    })
}

/// Starting-hand label such as `"AKs"`, `"T9o"` or `"QQ"`.
pub fn preflop_notation(hole: [Card; 2]) -> String {
    let (hi, lo) = if hole[0].rank >= hole[1].rank {
        (hole[0], hole[1])
    } else {
        (hole[1], hole[0])
    };
    let label = |c: Card| match c.rank.value() {
        10 => "T".to_string(),
        _ => c.rank.pretty(),
    };
    if hi.rank == lo.rank {
        format!("{}{}", label(hi), label(lo))
    } else {
        let suited = if hi.suit == lo.suit { 's' } else { 'o' };
        format!("{}{}{}", label(hi), label(lo), suited)
    }
}
