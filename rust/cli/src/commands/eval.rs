//! AI policy evaluation command.
//!
//! Plays two AIs against each other and compares results, showdown counts
//! and how often each one picks every action.

use super::AiMatch;
use crate::config::{self, TableOverrides};
use crate::error::CliError;
use crate::ui;
use hupoker_engine::logger::HandRecord;
use hupoker_engine::player::{Action, Position};
use std::io::Write;

/// Statistics of one side of the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EvalStats {
    hands_played: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    showdowns: u32,
    chips: i64,
    /// Indexed like [`Action::all`].
    actions: [u32; 6],
}

impl EvalStats {
    /// Adds a hand seen from `pos`, whose net result is `reward`.
    fn update(&mut self, record: &HandRecord, pos: Position, reward: i64) {
        self.hands_played += 1;
        match reward.signum() {
            1 => self.wins += 1,
            -1 => self.losses += 1,
            _ => self.draws += 1,
        }
        if record.showdown.is_some() {
            self.showdowns += 1;
        }
        self.chips += reward;
        for a in record.actions.iter().filter(|a| a.position == pos) {
            if let Some(i) = Action::all().iter().position(|x| *x == a.action) {
                self.actions[i] += 1;
            }
        }
    }

    fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            (self.wins as f64 / self.hands_played as f64) * 100.0
        }
    }

    fn avg_chip_delta(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            self.chips as f64 / self.hands_played as f64
        }
    }

    fn action_percentage(&self, count: u32) -> f64 {
        let total: u32 = self.actions.iter().sum();
        if total == 0 {
            0.0
        } else {
            (count as f64 / total as f64) * 100.0
        }
    }

    fn write(&self, label: &str, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}", label)?;
        writeln!(
            out,
            "  Wins: {} ({:.1}%)  Losses: {}  Draws: {}",
            self.wins,
            self.win_rate(),
            self.losses,
            self.draws
        )?;
        writeln!(
            out,
            "  Chips: {}  Avg per hand: {:.2}  Showdowns: {}",
            ui::signed(self.chips),
            self.avg_chip_delta(),
            self.showdowns
        )?;
        let mix: Vec<String> = Action::all()
            .iter()
            .zip(self.actions)
            .map(|(a, n)| format!("{} {:.1}%", a, self.action_percentage(n)))
            .collect();
        writeln!(out, "  Actions: {}", mix.join(", "))?;
        Ok(())
    }
}

/// Evaluates `ai_a` against `ai_b` over `hands` hands. The seats alternate
/// every hand, so both AIs post each blind equally often.
pub fn handle_eval_command(
    ai_a: &str,
    ai_b: &str,
    hands: u32,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let resolved = config::load_with_sources()?;
    let table = TableOverrides {
        seed,
        ..TableOverrides::default()
    };
    let setup = table.resolve(&resolved.config)?;
    let mut session = AiMatch::new(ai_a, ai_b, &setup, hands)?;

    let mut stats_a = EvalStats::default();
    let mut stats_b = EvalStats::default();
    for _ in 0..hands {
        let record = session.play_hand()?;
        let a_pos = record.hero_position;
        stats_a.update(&record, a_pos, record.hero_reward);
        stats_b.update(&record, a_pos.other(), -record.hero_reward);
    }

    writeln!(out, "AI Comparison Results")?;
    writeln!(
        out,
        "Hands: {}  Seed: {}  Limit: {}  Big blind: {}",
        hands, setup.seed, setup.limit, setup.big_blind
    )?;
    stats_a.write(&format!("AI A ({})", ai_a), out)?;
    stats_b.write(&format!("AI B ({})", ai_b), out)?;
    writeln!(out, "Rebuys: {}", session.rebuys)?;
    Ok(())
}
