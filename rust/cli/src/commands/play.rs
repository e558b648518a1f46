//! # Play Command
//!
//! Heads-up play from the terminal: the user is the hero and an AI from
//! [`hupoker_ai`] sits in the other seat. The hand history is printed as
//! the hand unfolds, and the user answers each prompt with an action:
//!
//! - `check`/`k`, `call`/`c`, `fold`/`f`, `all-in`/`a`
//! - `bet [amount]`/`b`, `raise [amount]`/`r` (the amount is the total put
//!   in by the action, used in no-limit only; the minimum is used when it is
//!   left out)
//! - `q`/`quit` ends the session
//!
//! Closing the input in the middle of a hand interrupts the session.

use crate::config::{self, TableOverrides};
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::ui;
use hupoker_ai::create_ai;
use hupoker_engine::errors::GameError;
use hupoker_engine::game::HuGame;
use hupoker_engine::player::{Action, DecisionContext, Player, Strategy};
use hupoker_engine::round::BettingRound;
use hupoker_engine::rules::min_raise;
use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

const HERO_NAME: &str = "You";

#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    /// Opponent AI; the configured opponent when absent.
    pub vs: Option<String>,
    /// Hands to play; the configured maximum when absent.
    pub hands: Option<u32>,
    pub table: TableOverrides,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Act(Action, Option<u32>),
    Quit,
}

fn parse_command(input: &str) -> Result<Command, String> {
    let lowered = input.trim().to_ascii_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    let Some(&word) = parts.first() else {
        return Err("Empty input".to_string());
    };
    if parts.len() > 2 {
        return Err(format!("Too many words in '{}'", input.trim()));
    }
    let action = match word {
        "q" | "quit" => return Ok(Command::Quit),
        "k" | "x" => Action::Check,
        "c" => Action::Call,
        "b" => Action::Bet,
        "r" => Action::Raise,
        "f" => Action::Fold,
        "a" | "allin" => Action::AllIn,
        other => other.parse().map_err(|_| {
            format!(
                "Unrecognized action '{}'. Valid actions: check, call, bet [amount], raise [amount], fold, all-in, q",
                other
            )
        })?,
    };
    let amount = match parts.get(1) {
        None => None,
        Some(_) if !matches!(action, Action::Bet | Action::Raise) => {
            return Err(format!("{} takes no amount", action));
        }
        Some(n) => match n.parse::<u32>() {
            Ok(v) if v > 0 => Some(v),
            _ => return Err(format!("Invalid amount '{}'", n)),
        },
    };
    Ok(Command::Act(action, amount))
}

/// The hero's seat. Actions come from the prompt through [`HuGame::step`];
/// the only thing the round asks this strategy for is the size of a
/// no-limit bet, which the prompt leaves in `pending`.
struct ConsolePlayer {
    pending: Rc<Cell<Option<u32>>>,
}

impl Strategy for ConsolePlayer {
    fn name(&self) -> &str {
        "console"
    }

    fn decide(&mut self, _legal: &[Action], _ctx: &DecisionContext) -> Result<Action, GameError> {
        Err(GameError::Strategy(
            "the console player acts through the prompt".to_string(),
        ))
    }

    fn choose_amount(&mut self, minimum: u32, _maximum: u32, _pot: u32) -> Result<u32, GameError> {
        Ok(self.pending.take().unwrap_or(minimum))
    }
}

/// Writes the history lines of the current hand not printed yet.
fn print_new_history(
    round: Option<&BettingRound>,
    printed: &mut usize,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let Some(round) = round else {
        return Ok(());
    };
    let history = round.hand_history();
    for line in history.lines().skip(*printed) {
        writeln!(out, "{}", line)?;
        *printed += 1;
    }
    Ok(())
}

fn print_prompt(round: &BettingRound, out: &mut dyn Write) -> std::io::Result<()> {
    let hero = round.hero_position();
    let stack = round.player(hero).stack();
    let hole = round.hand(hero).private_cards();
    let legal = round.possible_actions();
    writeln!(
        out,
        "[{}] Board: {}  Hole: {}  Pot: {}  To call: {}  Stack: {}",
        round.street(),
        ui::format_cards(round.community_cards()),
        ui::format_cards(&hole),
        round.pot_size(),
        round.imbalance(),
        stack
    )?;
    if !round.config().limit.is_fixed() {
        let bb = round.config().big_blind;
        if legal.contains(&Action::Bet) {
            writeln!(out, "Bet sizes: {}-{}", bb.min(stack), stack)?;
        }
        if legal.contains(&Action::Raise) {
            let imbalance = round.imbalance();
            writeln!(out, "Raise sizes: {}-{}", min_raise(imbalance, bb, stack), stack)?;
        }
    }
    write!(out, "Enter action ({}/q): ", ui::format_actions(&legal))?;
    out.flush()
}

/// Handle the play command: the user against one AI.
///
/// # Returns
///
/// * `Ok(())` when the hands are played or the user quits
/// * `Err(CliError::Interrupted)` when the input ends mid-hand
/// * `Err(CliError)` for invalid arguments, configuration or I/O failures
pub fn handle_play_command(
    args: &PlayArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    let setup = args.table.resolve(&resolved.config)?;
    let hands = args.hands.unwrap_or(resolved.config.max_hands);
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let vs = args
        .vs
        .clone()
        .unwrap_or_else(|| resolved.config.opponent.clone());
    let villain_strategy = create_ai(&vs, Some(setup.seed.wrapping_add(2)))?;

    let pending = Rc::new(Cell::new(None));
    let hero = Player::new(
        HERO_NAME,
        setup.starting_stack,
        Box::new(ConsolePlayer {
            pending: Rc::clone(&pending),
        }),
    );
    let villain = Player::new(
        format!("Villain-{}", villain_strategy.name()),
        setup.starting_stack,
        villain_strategy,
    );
    let mut game = HuGame::new(setup.game_config(hands), hero, villain);

    writeln!(
        out,
        "play: vs={} hands={} seed={} limit={} big_blind={} stack={}",
        vs, hands, setup.seed, setup.limit, setup.big_blind, setup.starting_stack
    )?;

    let mut played = 0u32;
    let mut net = 0i64;
    'session: while !game.is_over() {
        let mut transition = game.initial_step()?;
        let mut printed = 0usize;
        writeln!(out)?;
        print_new_history(game.round(), &mut printed, out)?;

        while !transition.hand_over {
            if let Some(round) = game.round() {
                print_prompt(round, out)?;
            }
            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                return Err(CliError::Interrupted(format!(
                    "input closed after {} hands",
                    played
                )));
            };
            let (action, amount) = match parse_command(&line) {
                Ok(Command::Quit) => break 'session,
                Ok(Command::Act(action, amount)) => (action, amount),
                Err(msg) => {
                    ui::write_error(err, &msg)?;
                    continue;
                }
            };
            if amount.is_some() && setup.limit.is_fixed() {
                ui::display_warning(err, "amounts are fixed in limit play; ignoring it")?;
            }
            pending.set(amount);
            let result = game.step(action);
            pending.set(None);
            match result {
                Ok(t) => transition = t,
                Err(e @ (GameError::IllegalAction { .. } | GameError::InvalidBetAmount { .. })) => {
                    ui::write_error(err, &e.to_string())?;
                }
                Err(e) => return Err(e.into()),
            }
            print_new_history(game.round(), &mut printed, out)?;
        }

        played += 1;
        net += transition.reward;
        let [mine, theirs] = game.stacks();
        writeln!(
            out,
            "Result: {}  Stacks: {} {} / {} {}",
            ui::signed(transition.reward),
            HERO_NAME,
            mine,
            vs,
            theirs
        )?;
    }

    let [mine, theirs] = game.stacks();
    writeln!(out)?;
    if mine == 0 || theirs == 0 {
        let broke = if mine == 0 { HERO_NAME } else { vs.as_str() };
        writeln!(out, "Game over: {} is broke", broke)?;
    }
    writeln!(out, "Hands played: {}", played)?;
    writeln!(out, "Net: {}", ui::signed(net))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(hands: u32) -> PlayArgs {
        PlayArgs {
            vs: Some("fish".to_string()),
            hands: Some(hands),
            table: TableOverrides {
                seed: Some(42),
                big_blind: Some(10),
                stack: Some(100),
                no_limit: false,
            },
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command(" QUIT "), Ok(Command::Quit));
        assert_eq!(parse_command("k"), Ok(Command::Act(Action::Check, None)));
        assert_eq!(parse_command("call"), Ok(Command::Act(Action::Call, None)));
        assert_eq!(parse_command("all-in"), Ok(Command::Act(Action::AllIn, None)));
        assert_eq!(parse_command("bet 40"), Ok(Command::Act(Action::Bet, Some(40))));
        assert_eq!(parse_command("r 25"), Ok(Command::Act(Action::Raise, Some(25))));
        assert_eq!(parse_command("raise"), Ok(Command::Act(Action::Raise, None)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_command("").is_err());
        assert!(parse_command("dance").unwrap_err().contains("Unrecognized"));
        assert!(parse_command("bet -3").is_err());
        assert!(parse_command("bet 0").is_err());
        assert!(parse_command("call 10").is_err());
        assert!(parse_command("bet 10 20").is_err());
    }

    #[test]
    fn console_player_sizes_from_the_prompt() {
        let pending = Rc::new(Cell::new(Some(30)));
        let mut p = ConsolePlayer {
            pending: Rc::clone(&pending),
        };
        assert_eq!(p.choose_amount(10, 100, 15).unwrap(), 30);
        assert_eq!(pending.get(), None);
        assert_eq!(p.choose_amount(10, 100, 15).unwrap(), 10);
    }

    #[test]
    fn quit_before_acting() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new("q\n");
        handle_play_command(&args(3), &mut out, &mut err, &mut input).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("play: vs=fish hands=3 seed=42"));
        assert!(output.contains("is dealt"));
        assert!(output.contains("Hands played: 0"));
    }

    #[test]
    fn fold_or_check_through_two_hands() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new("f\nk\n".repeat(20));
        handle_play_command(&args(2), &mut out, &mut err, &mut input).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Result: ").count(), 2);
        assert!(output.contains("Hands played: 2"));
        // stacks always add up to the chips brought to the table
        let last = output.lines().filter(|l| l.starts_with("Result: ")).last().unwrap();
        let (_, stacks) = last.split_once("Stacks:").unwrap();
        let nums: Vec<u32> = stacks
            .split_whitespace()
            .filter_map(|w| w.parse().ok())
            .collect();
        assert_eq!(nums.len(), 2);
        assert_eq!(nums.iter().sum::<u32>(), 200);
    }

    #[test]
    fn bad_input_reprompts() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new("dance\nq\n");
        handle_play_command(&args(1), &mut out, &mut err, &mut input).unwrap();
        let errors = String::from_utf8(err).unwrap();
        assert!(errors.contains("Unrecognized action 'dance'"));
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Enter action").count(), 2);
    }

    #[test]
    fn closed_input_interrupts() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new("");
        let result = handle_play_command(&args(1), &mut out, &mut err, &mut input);
        assert!(matches!(result, Err(CliError::Interrupted(_))));
    }

    #[test]
    fn zero_hands_and_unknown_opponent() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = Cursor::new("");
        let result = handle_play_command(&args(0), &mut out, &mut err, &mut input);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let bad = PlayArgs {
            vs: Some("oracle".to_string()),
            ..args(1)
        };
        let result = handle_play_command(&bad, &mut out, &mut err, &mut input);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
