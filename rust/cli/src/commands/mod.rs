//! Command handlers for the `hupoker` binary.
//!
//! Each subcommand lives in its own module and exposes one
//! `handle_COMMAND_command(...) -> Result<(), CliError>` that writes to the
//! injected `&mut dyn Write` streams, so tests can capture the output.

pub mod bench;
pub mod cfg;
pub mod deal;
pub mod equity;
pub mod eval;
pub mod play;
pub mod rng;
pub mod sim;

pub use bench::handle_bench_command;
pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use equity::handle_equity_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;

use crate::config::TableSetup;
use crate::error::CliError;
use hupoker_ai::create_ai;
use hupoker_engine::game::HuGame;
use hupoker_engine::logger::HandRecord;
use hupoker_engine::player::Player;

/// A strategy-versus-strategy match that keeps going when a player busts:
/// both stacks are restored and play continues.
pub(crate) struct AiMatch {
    game: HuGame,
    pub rebuys: u32,
}

impl AiMatch {
    /// Seats `ai_a` as the hero and `ai_b` as the villain. Each AI gets its
    /// own seed derived from the table seed.
    pub fn new(ai_a: &str, ai_b: &str, setup: &TableSetup, hands: u32) -> Result<Self, CliError> {
        let a = create_ai(ai_a, Some(setup.seed.wrapping_add(1)))?;
        let b = create_ai(ai_b, Some(setup.seed.wrapping_add(2)))?;
        let hero = Player::new(format!("A-{}", a.name()), setup.starting_stack, a);
        let villain = Player::new(format!("B-{}", b.name()), setup.starting_stack, b);
        Ok(Self {
            game: HuGame::new(setup.game_config(hands), hero, villain),
            rebuys: 0,
        })
    }

    pub fn play_hand(&mut self) -> Result<HandRecord, CliError> {
        if self.game.is_over() {
            self.game.reset();
            self.rebuys += 1;
        }
        Ok(self.game.play_hand()?)
    }
}
