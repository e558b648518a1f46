//! Small helpers for terminal output shared by the command handlers.

use std::io::Write;

use hupoker_engine::cards::Card;
use hupoker_engine::player::Action;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Space-separated cards, or `-` when there are none.
pub fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Signed chip amount, e.g. `+15` or `-10`.
pub fn signed(n: i64) -> String {
    if n > 0 {
        format!("+{}", n)
    } else {
        n.to_string()
    }
}
