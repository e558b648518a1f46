//! `equity`: Monte Carlo win rate of two hole cards against a random hand.

use crate::error::CliError;
use crate::ui::format_cards;
use hupoker_engine::cards::{Card, parse_cards};
use hupoker_engine::equity::estimate_win_rate;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::io::Write;

fn parse_input(hole: &str, board: &str) -> Result<([Card; 2], Vec<Card>), CliError> {
    let hole_cards = parse_cards(hole)?;
    let [a, b] = hole_cards[..] else {
        return Err(CliError::InvalidInput(format!(
            "expected 2 hole cards, got {}",
            hole_cards.len()
        )));
    };
    let community = parse_cards(board)?;
    if community.len() > 5 {
        return Err(CliError::InvalidInput(format!(
            "expected at most 5 board cards, got {}",
            community.len()
        )));
    }
    let mut seen = HashSet::new();
    for card in [a, b].iter().chain(&community) {
        if !seen.insert(*card) {
            return Err(CliError::InvalidInput(format!("card {} appears twice", card)));
        }
    }
    Ok(([a, b], community))
}

/// Estimates how often `hole` wins or ties at showdown against one random
/// hand, with `board` already on the table.
pub fn handle_equity_command(
    hole: &str,
    board: &str,
    sims: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if sims == 0 {
        return Err(CliError::InvalidInput("sims must be >= 1".to_string()));
    }
    let (hole_cards, community) = parse_input(hole, board)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let p = estimate_win_rate(sims, hole_cards, &community, &mut rng)?;

    writeln!(out, "Hole: {}", format_cards(&hole_cards))?;
    writeln!(out, "Board: {}", format_cards(&community))?;
    writeln!(out, "Equity: {:.3} ({} sims, seed {})", p, sims, seed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equity_of(out: &[u8]) -> f64 {
        let text = String::from_utf8(out.to_vec()).unwrap();
        let line = text.lines().find(|l| l.starts_with("Equity: ")).unwrap();
        line["Equity: ".len()..]
            .split_whitespace()
            .next()
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn made_royal_flush_always_wins() {
        let mut out = Vec::new();
        handle_equity_command("Ah Kh", "Qh Jh Th", 200, Some(1), &mut out).unwrap();
        assert_eq!(equity_of(&out), 1.0);
    }

    #[test]
    fn aces_beat_a_random_hand_preflop() {
        let mut out = Vec::new();
        handle_equity_command("As Ad", "", 500, Some(2), &mut out).unwrap();
        let p = equity_of(&out);
        assert!(p > 0.75 && p < 0.95, "{}", p);
    }

    #[test]
    fn seeded_runs_repeat() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_equity_command("7c 2d", "Kh 9s 4c", 300, Some(9), &mut a).unwrap();
        handle_equity_command("7c 2d", "Kh 9s 4c", 300, Some(9), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_input() {
        let mut out = Vec::new();
        for (hole, board) in [("Ah", ""), ("Ah Kh Qh", ""), ("Ah Ah", ""), ("Ah Kh", "Ah")] {
            let result = handle_equity_command(hole, board, 10, Some(1), &mut out);
            assert!(matches!(result, Err(CliError::InvalidInput(_))), "{} / {}", hole, board);
        }
        let result = handle_equity_command("Xx Kh", "", 10, Some(1), &mut out);
        assert!(matches!(result, Err(CliError::Engine(_))));
        let result = handle_equity_command("Ah Kh", "", 0, Some(1), &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
