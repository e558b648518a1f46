//! # hupoker CLI Library
//!
//! Command-line front end for the heads-up engine: play against an AI,
//! simulate and evaluate AI matches, and inspect the evaluator and the RNG.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a handler from [`commands`]
//! and returns the process exit code.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = hupoker_cli::run(["hupoker", "deal", "--seed", "42"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Board: "));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play hands against an AI from the terminal
//! - `sim`: Play AI against AI and write JSONL hand histories
//! - `eval`: Compare two AIs head-to-head
//! - `deal`: Deal a single hand and show both best combinations
//! - `equity`: Monte Carlo win rate of hole cards
//! - `bench`: Benchmark hand evaluation
//! - `cfg`: Display the resolved configuration
//! - `rng`: Print ChaCha20 samples

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, HupokerCli};
use commands::play::PlayArgs;
use commands::sim::SimArgs;
use commands::{
    handle_bench_command, handle_cfg_command, handle_deal_command, handle_equity_command,
    handle_eval_command, handle_play_command, handle_rng_command, handle_sim_command,
};
use config::TableOverrides;

pub use error::CliError;

const COMMANDS: &[&str] = &[
    "play", "sim", "eval", "deal", "equity", "bench", "cfg", "rng",
];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when play input ends
/// in the middle of a hand
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HupokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };

    let result = match cli.cmd {
        Commands::Play {
            vs,
            hands,
            seed,
            big_blind,
            stack,
            no_limit,
        } => {
            let args = PlayArgs {
                vs,
                hands,
                table: TableOverrides {
                    seed,
                    big_blind,
                    stack,
                    no_limit,
                },
            };
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&args, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            hands,
            ai_a,
            ai_b,
            output,
            seed,
            big_blind,
            stack,
            no_limit,
        } => {
            let args = SimArgs {
                hands,
                ai_a,
                ai_b,
                output,
                table: TableOverrides {
                    seed,
                    big_blind,
                    stack,
                    no_limit,
                },
            };
            handle_sim_command(&args, out, err)
        }
        Commands::Eval {
            ai_a,
            ai_b,
            hands,
            seed,
        } => handle_eval_command(&ai_a, &ai_b, hands, seed, out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Equity {
            hole,
            board,
            sims,
            seed,
        } => handle_equity_command(&hole, &board, sims, seed, out),
        Commands::Bench { iterations } => handle_bench_command(iterations, out),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let code = exit_code::for_error(&e);
            if ui::write_error(err, &e.to_string()).is_err() {
                return exit_code::ERROR;
            }
            code
        }
    }
}

/// Help and version go to `out` with success; anything else prints the clap
/// error and a command list to `err`.
fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }
    let mut usage = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "hupoker: heads-up Texas Hold'em")?;
        writeln!(err, "Usage: hupoker <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: hupoker --help")
    };
    let _ = usage();
    exit_code::ERROR
}
