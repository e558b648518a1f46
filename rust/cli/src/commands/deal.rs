//! `deal`: deals one hand and shows how it would end at showdown.

use crate::error::CliError;
use crate::ui::format_cards;
use hupoker_engine::deck::Deck;
use hupoker_engine::hand::{Hand, Winner, compare_two_hands, preflop_notation};
use hupoker_engine::player::Position;
use std::io::Write;

/// Deals nine cards the way a hand is dealt (big blind hole cards first,
/// then the small blind's, then the board) and prints both hole cards,
/// the board and each seat's best combination.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let cards = Deck::new_with_seed(seed).deal_hand()?;
    let board = &cards[4..];

    let mut button = Hand::new([cards[2], cards[3]]);
    let mut big_blind = Hand::new([cards[0], cards[1]]);
    for hand in [&mut button, &mut big_blind] {
        hand.add_public_cards(board);
        hand.update_best_combination()?;
    }

    writeln!(out, "Seed: {}", seed)?;
    for (pos, hand) in [(Position::Button, &button), (Position::BigBlind, &big_blind)] {
        let hole = hand.private_cards();
        writeln!(
            out,
            "{}: {} ({})",
            pos,
            format_cards(&hole),
            preflop_notation(hole)
        )?;
    }
    writeln!(out, "Board: {}", format_cards(board))?;
    for (pos, hand) in [(Position::Button, &button), (Position::BigBlind, &big_blind)] {
        let combo = hand.best_combination().map(|c| format_cards(c)).unwrap_or_default();
        let rank = hand.human_readable_rank().unwrap_or("unknown");
        writeln!(out, "{} best: {} ({})", pos, combo, rank)?;
    }
    let winner = match compare_two_hands(&button, &big_blind)? {
        Winner::Hand1 => Position::Button.to_string(),
        Winner::Hand2 => Position::BigBlind.to_string(),
        Winner::Draw => "split".to_string(),
    };
    writeln!(out, "Winner: {}", winner)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        handle_deal_command(Some(12345), &mut out1).unwrap();
        handle_deal_command(Some(12345), &mut out2).unwrap();
        assert_eq!(out1, out2);
    }

    #[test]
    fn test_deal_command_output_format() {
        let mut out = Vec::new();
        handle_deal_command(Some(999), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Seed: 999");
        assert!(lines[1].starts_with("SB: "));
        assert!(lines[2].starts_with("BB: "));
        assert!(lines[3].starts_with("Board: "));
        assert_eq!(lines[3].split_whitespace().count(), 6);
        assert!(lines[4].starts_with("SB best: "));
        assert!(lines[5].starts_with("BB best: "));
        assert!(lines[6].starts_with("Winner: "));
    }

    #[test]
    fn test_deal_command_without_seed() {
        let mut out = Vec::new();
        handle_deal_command(None, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Board: "));
    }
}
