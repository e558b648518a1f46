use std::mem;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{format_hand_id, HandRecord};
use crate::player::{Action, Player, Position};
use crate::round::{BettingRound, HandConfig, Transition};
use crate::rules::BettingLimit;

/// Settings of a heads-up match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_hands: u32,
    pub big_blind: u32,
    pub limit: BettingLimit,
    /// Seed for dealing and seat assignment; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hands: 100,
            big_blind: 10,
            limit: BettingLimit::FixedLimit,
            seed: None,
        }
    }
}

/// Outcome of [`HuGame::play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub hands_played: u32,
    /// Final stacks as `[hero, villain]`.
    pub final_stacks: [u32; 2],
    /// Sum of the hero's per-hand rewards.
    pub hero_total: i64,
    pub records: Vec<HandRecord>,
}

enum Table {
    /// Players between hands, as `[hero, villain]`.
    Idle([Player; 2]),
    InHand(Box<BettingRound>),
    /// Only observable if a round panicked mid-swap.
    Empty,
}

/// A heads-up match: deals hands, alternates the blinds and stops when the
/// hand limit is reached or a player is broke.
pub struct HuGame {
    config: GameConfig,
    table: Table,
    deck: Deck,
    hero_is_big_blind: bool,
    hand_number: u32,
    game_over: bool,
    date: String,
}

impl HuGame {
    pub fn new(config: GameConfig, hero: Player, villain: Player) -> Self {
        let mut deck = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::from_entropy(),
        };
        // flipped before the first hand
        let hero_is_big_blind = deck.rng_mut().random_bool(0.5);
        Self {
            config,
            table: Table::Idle([hero, villain]),
            deck,
            hero_is_big_blind,
            hand_number: 0,
            game_over: false,
            date: chrono::Utc::now().format("%Y%m%d").to_string(),
        }
    }

    /// Deals the next hand, posts the blinds and returns the hero's first view.
    pub fn initial_step(&mut self) -> Result<Transition, GameError> {
        if self.game_over {
            return Err(GameError::HandAlreadyComplete);
        }
        let players = match mem::replace(&mut self.table, Table::Empty) {
            Table::Idle(players) => players,
            Table::InHand(round) if round.hand_over() => round.into_players(),
            other => {
                self.table = other;
                return Err(GameError::HandAlreadyStarted);
            }
        };
        let cards = match self.deck.deal_hand() {
            Ok(cards) => cards,
            Err(e) => {
                self.table = Table::Idle(players);
                return Err(e);
            }
        };
        self.hand_number += 1;
        self.hero_is_big_blind = !self.hero_is_big_blind;
        let hero_position = if self.hero_is_big_blind {
            Position::BigBlind
        } else {
            Position::Button
        };
        let hand_config = HandConfig {
            big_blind: self.config.big_blind,
            limit: self.config.limit,
            hand_number: self.hand_number,
        };
        debug!(hand = self.hand_number, hero = %hero_position, "dealing hand");
        let mut round = Box::new(BettingRound::new(hero_position, players, hand_config, cards));
        let result = round.initial_step();
        self.table = Table::InHand(round);
        let transition = result?;
        self.refresh_game_over();
        Ok(transition)
    }

    /// Forwards the hero's action to the current hand.
    pub fn step(&mut self, action: Action) -> Result<Transition, GameError> {
        let round = self.round_mut()?;
        let transition = round.step(action)?;
        self.refresh_game_over();
        Ok(transition)
    }

    /// Plays one full hand with both strategies and returns its record.
    pub fn play_hand(&mut self) -> Result<HandRecord, GameError> {
        self.initial_step()?;
        let round = self.round_mut()?;
        round.play_out()?;
        self.refresh_game_over();
        self.last_record().ok_or(GameError::NoHandInProgress)
    }

    /// Plays hands until the game is over.
    pub fn play(&mut self) -> Result<GameSummary, GameError> {
        let mut records = Vec::new();
        while !self.game_over {
            records.push(self.play_hand()?);
        }
        let final_stacks = self.stacks();
        let hero_total = records.iter().map(|r| r.hero_reward).sum();
        info!(hands = self.hand_number, ?final_stacks, hero_total, "game over");
        Ok(GameSummary {
            hands_played: self.hand_number,
            final_stacks,
            hero_total,
            records,
        })
    }

    fn refresh_game_over(&mut self) {
        let Some(round) = self.round() else {
            return;
        };
        if !round.hand_over() {
            return;
        }
        let broke = round.players().iter().any(|p| p.stack() == 0);
        self.game_over = broke || self.hand_number >= self.config.max_hands;
        if self.game_over {
            debug!(hand = self.hand_number, broke, "game finished");
        }
    }

    /// Restores starting stacks and counters.
    pub fn reset(&mut self) {
        let mut players = match mem::replace(&mut self.table, Table::Empty) {
            Table::Idle(players) => players,
            Table::InHand(round) => round.into_players(),
            Table::Empty => return,
        };
        for p in players.iter_mut() {
            p.reset_stack();
        }
        self.table = Table::Idle(players);
        self.hand_number = 0;
        self.game_over = false;
    }

    pub fn round(&self) -> Option<&BettingRound> {
        match &self.table {
            Table::InHand(round) => Some(round),
            _ => None,
        }
    }

    fn round_mut(&mut self) -> Result<&mut BettingRound, GameError> {
        match &mut self.table {
            Table::InHand(round) => Ok(round),
            _ => Err(GameError::NoHandInProgress),
        }
    }

    /// Record of the hand in progress or just finished.
    pub fn last_record(&self) -> Option<HandRecord> {
        let id = format_hand_id(&self.date, self.hand_number);
        self.round().map(|r| r.record(id, self.config.seed))
    }

    /// Current stacks as `[hero, villain]`.
    pub fn stacks(&self) -> [u32; 2] {
        match &self.table {
            Table::Idle([hero, villain]) => [hero.stack(), villain.stack()],
            Table::InHand(round) => {
                let hero = round.hero_position();
                [round.player(hero).stack(), round.player(hero.other()).stack()]
            }
            Table::Empty => [0, 0],
        }
    }

    pub fn possible_actions(&self) -> Vec<Action> {
        self.round().map(BettingRound::possible_actions).unwrap_or_default()
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GameError;
    use crate::player::{DecisionContext, Strategy};

    struct CallingStation;

    impl Strategy for CallingStation {
        fn name(&self) -> &str {
            "station"
        }

        fn decide(&mut self, legal: &[Action], _ctx: &DecisionContext) -> Result<Action, GameError> {
            for a in [Action::Check, Action::Call, Action::AllIn] {
                if legal.contains(&a) {
                    return Ok(a);
                }
            }
            Ok(legal[0])
        }
    }

    fn game(max_hands: u32, stack: u32) -> HuGame {
        let config = GameConfig {
            max_hands,
            seed: Some(11),
            ..GameConfig::default()
        };
        HuGame::new(
            config,
            Player::new("a", stack, Box::new(CallingStation)),
            Player::new("b", stack, Box::new(CallingStation)),
        )
    }

    #[test]
    fn blinds_alternate() {
        let mut g = game(4, 1_000);
        let mut seats = Vec::new();
        for _ in 0..4 {
            g.play_hand().unwrap();
            seats.push(g.round().unwrap().hero_position());
        }
        assert_ne!(seats[0], seats[1]);
        assert_eq!(seats[0], seats[2]);
        assert!(g.is_over());
    }

    #[test]
    fn chips_are_conserved() {
        let mut g = game(30, 100);
        let summary = g.play().unwrap();
        assert!(summary.hands_played <= 30);
        let total: u32 = summary.final_stacks.iter().sum();
        assert_eq!(total, 200);
        assert_eq!(summary.records.len() as u32, summary.hands_played);
    }

    #[test]
    fn step_without_hand_fails() {
        let mut g = game(1, 100);
        assert_eq!(g.step(Action::Call), Err(GameError::NoHandInProgress));
        g.play().unwrap();
        assert_eq!(g.initial_step(), Err(GameError::HandAlreadyComplete));
        g.reset();
        assert_eq!(g.stacks(), [100, 100]);
        assert!(g.initial_step().is_ok());
    }
}
