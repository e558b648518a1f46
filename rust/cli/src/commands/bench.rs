//! `bench`: times the evaluator on random seven-card hands.

use crate::error::CliError;
use hupoker_engine::deck::Deck;
use hupoker_engine::hand::best_combination;
use std::io::Write;
use std::time::Instant;

/// Evaluates `iterations` seven-card hands dealt from a deck seeded with 1
/// and reports the elapsed time and throughput.
pub fn handle_bench_command(iterations: u32, out: &mut dyn Write) -> Result<(), CliError> {
    if iterations == 0 {
        return Err(CliError::InvalidInput("iterations must be >= 1".to_string()));
    }
    let mut deck = Deck::new_with_seed(1);
    let start = Instant::now();
    for _ in 0..iterations {
        let cards = deck.deal_cards(7)?;
        best_combination(&cards)?;
    }
    let dur = start.elapsed();
    let per_sec = f64::from(iterations) / dur.as_secs_f64().max(f64::EPSILON);
    writeln!(out, "Benchmark: {} iters in {:?}", iterations, dur)?;
    writeln!(out, "Throughput: {:.0} hands/sec", per_sec)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bench_command_reports_iterations() {
        let mut out = Vec::new();
        handle_bench_command(50, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Benchmark: 50 iters in "));
        assert!(output.contains("hands/sec"));
    }

    #[test]
    fn test_bench_command_rejects_zero() {
        let mut out = Vec::new();
        let result = handle_bench_command(0, &mut out);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(out.is_empty());
    }
}
