use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Index used by [`Card::ordinal`], in 1..=4.
    pub fn index(self) -> u8 {
        match self {
            Suit::Clubs => 1,
            Suit::Diamonds => 2,
            Suit::Hearts => 3,
            Suit::Spades => 4,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison and hand evaluation purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Face cards map to letters, everything else keeps its number.
    pub fn pretty(self) -> String {
        match self {
            Rank::Jack => "J".to_string(),
            Rank::Queen => "Q".to_string(),
            Rank::King => "K".to_string(),
            Rank::Ace => "A".to_string(),
            other => other.value().to_string(),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = GameError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        let rank = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return Err(GameError::InvalidCard(format!("numeric rank {}", v))),
        };
        Ok(rank)
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are the fundamental unit of the poker game, used in player hands, the board, and the deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// Unique id in 1..=52, `4 * (rank - 2) + suit index`.
    ///
    /// Zero is never produced, so feature vectors can use it for "not dealt".
    pub fn ordinal(&self) -> u8 {
        4 * (self.rank.value() - 2) + self.suit.index()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.pretty(), self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    /// Parses `"Ac"`, `"10h"`, `"Td"` or `"5S"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GameError::InvalidCard(s.to_string());
        let mut chars = s.chars();
        let suit_char = chars.next_back().ok_or_else(invalid)?;
        let rank_str = chars.as_str();
        let suit = match suit_char.to_ascii_lowercase() {
            'c' | '♣' => Suit::Clubs,
            'd' | '♦' => Suit::Diamonds,
            'h' | '♥' => Suit::Hearts,
            's' | '♠' => Suit::Spades,
            _ => return Err(invalid()),
        };
        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "A" => Rank::Ace,
            "K" => Rank::King,
            "Q" => Rank::Queen,
            "J" => Rank::Jack,
            "T" => Rank::Ten,
            digits => {
                let v: u8 = digits.parse().map_err(|_| invalid())?;
                Rank::try_from(v).map_err(|_| invalid())?
            }
        };
        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace separated list of cards such as `"Ac Kd 7h"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split_whitespace().map(str::parse).collect()
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &r in &all_ranks() {
        for &s in &all_suits() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}
