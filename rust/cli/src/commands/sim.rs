//! Simulation command handler.
//!
//! Plays two AIs against each other for a fixed number of hands and, when an
//! output path is given, appends every hand to a JSONL history file. A player
//! who busts is restored to the starting stack so the run always reaches the
//! requested hand count.
//!
//! # Examples
//!
//! ```no_run
//! use hupoker_cli::commands::sim::{SimArgs, handle_sim_command};
//! use hupoker_cli::config::TableOverrides;
//! use std::io;
//!
//! let args = SimArgs {
//!     hands: 1000,
//!     ai_a: "random".to_string(),
//!     ai_b: "fish".to_string(),
//!     output: Some("data/sim.jsonl".to_string()),
//!     table: TableOverrides { seed: Some(42), ..Default::default() },
//! };
//! handle_sim_command(&args, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use super::AiMatch;
use crate::config;
use crate::config::TableOverrides;
use crate::error::CliError;
use crate::io_utils::ensure_parent_dir;
use crate::ui;
use hupoker_engine::logger::HandLogger;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone)]
pub struct SimArgs {
    pub hands: u32,
    pub ai_a: String,
    pub ai_b: String,
    /// JSONL file to write; nothing is written when absent.
    pub output: Option<String>,
    pub table: TableOverrides,
}

pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let resolved = config::load_with_sources()?;
    let setup = args.table.resolve(&resolved.config)?;
    let mut session = AiMatch::new(&args.ai_a, &args.ai_b, &setup, args.hands)?;

    let mut logger = match &args.output {
        Some(p) => {
            let path = Path::new(p);
            ensure_parent_dir(path)?;
            match HandLogger::create(path) {
                Ok(logger) => Some(logger),
                Err(e) => {
                    ui::write_error(err, &format!("Failed to open output file: {}", e))?;
                    return Err(CliError::Io(e));
                }
            }
        }
        None => None,
    };

    writeln!(
        out,
        "sim: {} vs {} hands={} seed={} limit={} big_blind={} stack={}",
        args.ai_a,
        args.ai_b,
        args.hands,
        setup.seed,
        setup.limit,
        setup.big_blind,
        setup.starting_stack
    )?;

    let mut a_total = 0i64;
    for _ in 0..args.hands {
        let mut record = session.play_hand()?;
        a_total += record.hero_reward;
        if let Some(logger) = logger.as_mut() {
            // ids stay unique across rebuys
            record.hand_id = logger.next_id();
            logger.write(&record)?;
        }
    }
    info!(hands = args.hands, a_total, rebuys = session.rebuys, "simulation finished");

    writeln!(out, "Simulated: {} hands", args.hands)?;
    writeln!(out, "A ({}): {}", args.ai_a, ui::signed(a_total))?;
    writeln!(out, "B ({}): {}", args.ai_b, ui::signed(-a_total))?;
    writeln!(out, "Rebuys: {}", session.rebuys)?;
    if let Some(p) = &args.output {
        writeln!(out, "Output: {}", p)?;
    }
    Ok(())
}
