//! Command-line argument definitions.
//!
//! Flags left unset fall back to the resolved configuration (see `cfg`).

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "hupoker",
    version,
    about = "Heads-up Texas Hold'em engine and tools"
)]
pub struct HupokerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play heads-up against an AI from the terminal
    Play {
        /// Opponent AI (random, fish, starting-hand, strength)
        #[arg(long)]
        vs: Option<String>,
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        big_blind: Option<u32>,
        /// Starting stack of each player
        #[arg(long)]
        stack: Option<u32>,
        /// Play no-limit instead of fixed-limit
        #[arg(long)]
        no_limit: bool,
    },
    /// Play AI against AI and write the hand histories as JSONL
    Sim {
        #[arg(long)]
        hands: u32,
        #[arg(long, default_value = "random")]
        ai_a: String,
        #[arg(long, default_value = "fish")]
        ai_b: String,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        big_blind: Option<u32>,
        #[arg(long)]
        stack: Option<u32>,
        #[arg(long)]
        no_limit: bool,
    },
    /// Compare two AIs head-to-head
    Eval {
        #[arg(long)]
        ai_a: String,
        #[arg(long)]
        ai_b: String,
        #[arg(long)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Deal one hand and show both best combinations
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Monte Carlo win rate of hole cards against a random hand
    Equity {
        /// Hole cards, e.g. "Ac Kd"
        #[arg(long)]
        hole: String,
        /// Community cards, e.g. "Qh Jh 2c"
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 10_000)]
        sims: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Measure evaluator throughput on seven-card hands
    Bench {
        #[arg(long, default_value_t = 200)]
        iterations: u32,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print ChaCha20 samples for a seed
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
