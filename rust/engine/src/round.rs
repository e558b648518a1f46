//! The per-hand betting state machine.
//!
//! A [`BettingRound`] is built from the nine cards of a hand and the two
//! seated players, posts the blinds, then walks the streets
//! `PreFlop -> Flop -> Turn -> River -> Showdown` exactly once. The hero
//! drives it through [`BettingRound::step`]; the villain is asked for its
//! decisions through its [`Strategy`](crate::player::Strategy) whenever it is
//! on turn. Each call returns an immutable [`Transition`] seen from the hero's
//! seat.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::Card;
use crate::deck::CARDS_PER_HAND;
use crate::errors::GameError;
use crate::hand::{compare_two_hands, preflop_notation, Hand, Winner};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Action, DecisionContext, Player, Position};
use crate::rules::{
    fixed_bet_size, legal_actions, min_raise, validate_amount, BettingContext, BettingLimit,
};
use crate::trail::action_trail_code;

/// Betting stage of a hand. `Showdown` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub fn next(self) -> Street {
        match self {
            Street::PreFlop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Community cards visible on this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }

    /// Index of the betting street, `None` for the showdown.
    fn betting_index(self) -> Option<usize> {
        match self {
            Street::PreFlop => Some(0),
            Street::Flop => Some(1),
            Street::Turn => Some(2),
            Street::River => Some(3),
            Street::Showdown => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::PreFlop => "pre-flop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

pub const PREFLOP_ORDER: [Position; 2] = [Position::Button, Position::BigBlind];
pub const POSTFLOP_ORDER: [Position; 2] = [Position::BigBlind, Position::Button];

/// Parameters of a single hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandConfig {
    pub big_blind: u32,
    pub limit: BettingLimit,
    pub hand_number: u32,
}

impl HandConfig {
    pub fn small_blind(&self) -> u32 {
        self.big_blind / 2
    }
}

/// Numeric snapshot of the table from one seat.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub stack: u32,
    pub opponent_stack: u32,
    /// 1 when the seat is the big blind.
    pub position: u8,
    pub hole_cards: [u8; 2],
    /// Card ordinals, 0 until dealt.
    pub community_cards: [u8; 5],
    /// Trail codes for pre-flop, flop, turn and river.
    pub trails: [u32; 4],
    pub pot: u32,
}

impl StateVector {
    pub const LEN: usize = 15;

    pub fn as_array(&self) -> [i64; Self::LEN] {
        let mut out = [0i64; Self::LEN];
        out[0] = self.stack.into();
        out[1] = self.opponent_stack.into();
        out[2] = self.position.into();
        for (slot, v) in out[3..5].iter_mut().zip(self.hole_cards) {
            *slot = v.into();
        }
        for (slot, v) in out[5..10].iter_mut().zip(self.community_cards) {
            *slot = v.into();
        }
        for (slot, v) in out[10..14].iter_mut().zip(self.trails) {
            *slot = v.into();
        }
        out[14] = self.pot.into();
        out
    }
}

/// What the hero observes after a step.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateVector,
    /// Hero's net chip change, non-zero only once the hand is over.
    pub reward: i64,
    pub hand_over: bool,
}

/// One heads-up hand from the blinds to the fold or the showdown.
///
/// Invariants kept between calls:
/// * the two stacks plus the pot always equal the stacks at construction;
/// * `imbalance` is never negative: an all-in for less than a full call is
///   corrected on the spot by refunding the excess to the player who bet it;
/// * both [`Hand`]s always hold the same community cards.
pub struct BettingRound {
    /// Seated players, indexed by [`Position::index`].
    players: [Player; 2],
    hands: [Hand; 2],
    board: [Card; 5],
    hero: Position,
    config: HandConfig,
    initial_stacks: [u32; 2],
    street: Street,
    pot: u32,
    imbalance: u32,
    someone_all_in: bool,
    nb_actions: u32,
    trails: [String; 4],
    started: bool,
    hand_over: bool,
    hero_reward: i64,
    winners: Vec<Position>,
    showdown_notes: Option<String>,
    actions: Vec<ActionRecord>,
    history: Vec<String>,
}

impl fmt::Debug for BettingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BettingRound")
            .field("hero", &self.hero)
            .field("street", &self.street)
            .field("pot", &self.pot)
            .field("imbalance", &self.imbalance)
            .field("someone_all_in", &self.someone_all_in)
            .field("nb_actions", &self.nb_actions)
            .field("hand_over", &self.hand_over)
            .finish()
    }
}

impl BettingRound {
    /// Seats `[hero, villain]` with the hero in `hero_position`.
    ///
    /// `cards` holds the big blind's hole cards at 0..2, the small blind's at
    /// 2..4, the flop at 4..7, then the turn and the river.
    pub fn new(
        hero_position: Position,
        players: [Player; 2],
        config: HandConfig,
        cards: [Card; CARDS_PER_HAND],
    ) -> Self {
        let [hero, villain] = players;
        let players = match hero_position {
            Position::Button => [hero, villain],
            Position::BigBlind => [villain, hero],
        };
        let hands = [
            Hand::new([cards[2], cards[3]]),
            Hand::new([cards[0], cards[1]]),
        ];
        let board = [cards[4], cards[5], cards[6], cards[7], cards[8]];
        let initial_stacks = [players[0].stack(), players[1].stack()];
        Self {
            players,
            hands,
            board,
            hero: hero_position,
            config,
            initial_stacks,
            street: Street::PreFlop,
            pot: 0,
            imbalance: 0,
            someone_all_in: false,
            nb_actions: 0,
            trails: Default::default(),
            started: false,
            hand_over: false,
            hero_reward: 0,
            winners: Vec::new(),
            showdown_notes: None,
            actions: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Posts the blinds and lets the villain act until the hero is on turn.
    pub fn initial_step(&mut self) -> Result<Transition, GameError> {
        if self.started {
            return Err(GameError::HandAlreadyStarted);
        }
        self.started = true;
        let header = format!(
            "Hand #{} - {}, big blind {}",
            self.config.hand_number, self.config.limit, self.config.big_blind
        );
        let hero_hole = self.hands[self.hero.index()].private_cards();
        let dealt = format!(
            "{} is dealt {} {}",
            self.label(self.hero),
            hero_hole[0],
            hero_hole[1]
        );
        self.history.extend([header, dealt]);
        self.post_blinds();
        self.advance()?;
        self.drive(Some(self.hero))?;
        self.transition()
    }

    /// Applies the hero's `action`, then plays the villain until the hero is
    /// on turn again or the hand is over.
    ///
    /// If the villain's strategy fails after the hero acted, the villain stays
    /// on turn and `step` answers [`GameError::NotYourTurn`]; [`play_out`]
    /// resumes from there.
    ///
    /// [`play_out`]: BettingRound::play_out
    pub fn step(&mut self, action: Action) -> Result<Transition, GameError> {
        self.ensure_running()?;
        let on_turn = self.active();
        if on_turn != self.hero {
            return Err(GameError::NotYourTurn(on_turn));
        }
        let legal = self.possible_actions();
        if !legal.contains(&action) {
            return Err(GameError::IllegalAction { action, legal });
        }
        self.enforce(self.hero, action)?;
        self.advance()?;
        self.drive(Some(self.hero))?;
        self.transition()
    }

    /// Lets both strategies play until the hand ends, starting the hand if
    /// needed or picking up wherever it stopped.
    pub fn play_out(&mut self) -> Result<Transition, GameError> {
        if !self.started {
            self.initial_step()?;
        }
        self.drive(None)?;
        self.transition()
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NoHandInProgress);
        }
        if self.hand_over {
            return Err(GameError::HandAlreadyComplete);
        }
        Ok(())
    }

    /// Seat whose turn it is.
    pub fn active(&self) -> Position {
        let order = if self.street == Street::PreFlop {
            PREFLOP_ORDER
        } else {
            POSTFLOP_ORDER
        };
        order[(self.nb_actions % 2) as usize]
    }

    /// Legal actions of the seat on turn; empty once the hand is over.
    pub fn possible_actions(&self) -> Vec<Action> {
        if self.hand_over || !self.started {
            return Vec::new();
        }
        legal_actions(&self.betting_context(self.active()))
    }

    fn betting_context(&self, pos: Position) -> BettingContext {
        BettingContext {
            imbalance: self.imbalance,
            stack: self.players[pos.index()].stack(),
            someone_all_in: self.someone_all_in,
            limit: self.config.limit,
            actions_this_street: self.nb_actions,
        }
    }

    fn post_blinds(&mut self) {
        let bb = self.config.big_blind;
        let sb = self.config.small_blind();
        let sb_stack = self.players[Position::Button.index()].stack();
        let bb_stack = self.players[Position::BigBlind.index()].stack();

        let (sb_post, bb_post) = if sb_stack <= sb {
            let matched = sb_stack.min(bb_stack);
            warn!(sb_stack, matched, "small blind is all-in on the blinds");
            self.someone_all_in = true;
            (matched, matched)
        } else if bb_stack <= bb {
            warn!(bb_stack, "big blind is all-in on the blinds");
            self.someone_all_in = true;
            if bb_stack <= sb {
                (bb_stack, bb_stack)
            } else {
                (sb, bb_stack)
            }
        } else {
            (sb, bb)
        };

        self.players[Position::Button.index()].bet_amount(sb_post);
        self.players[Position::BigBlind.index()].bet_amount(bb_post);
        self.pot = sb_post + bb_post;
        self.imbalance = bb_post - sb_post;
        debug!(
            hand = self.config.hand_number,
            sb_post, bb_post, imbalance = self.imbalance, "blinds posted"
        );
        let line = format!(
            "{} posts {}, {} posts {}",
            self.label(Position::Button),
            sb_post,
            self.label(Position::BigBlind),
            bb_post
        );
        self.history.push(line);
    }

    /// Sizes, validates and applies `action` for `pos`. Nothing is mutated
    /// until the amount is known to be valid.
    fn enforce(&mut self, pos: Position, action: Action) -> Result<(), GameError> {
        let seat = pos.index();
        let stack = self.players[seat].stack();
        let bb = self.config.big_blind;
        let fixed = self.config.limit.is_fixed();

        let wager = match action {
            Action::Check | Action::Fold => 0,
            Action::Call => self.imbalance,
            Action::Bet => {
                if fixed {
                    fixed_bet_size(self.street, bb, stack)
                } else {
                    self.ask_amount(pos, bb.min(stack), stack)?
                }
            }
            Action::Raise => {
                let minimum = min_raise(self.imbalance, bb, stack);
                if fixed {
                    minimum
                } else {
                    self.ask_amount(pos, minimum, stack)?
                }
            }
            Action::AllIn => {
                if self.someone_all_in {
                    stack.min(self.imbalance)
                } else {
                    stack
                }
            }
        };

        if action == Action::Fold {
            self.log_action(pos, action, 0);
            return self.fold(pos);
        }

        if wager > 0 {
            self.players[seat].bet_amount(wager);
            self.pot += wager;
            let on_top = i64::from(wager) - i64::from(self.imbalance);
            if on_top < 0 {
                let refund = self.imbalance - wager;
                self.players[pos.other().index()].get_back_from_pot(refund);
                self.pot -= refund;
                self.imbalance = 0;
                debug!(refund, to = %pos.other(), "refunded uncalled chips");
                let line = format!("{} takes back {}", self.label(pos.other()), refund);
                self.history.push(line);
            } else {
                self.imbalance = wager - self.imbalance;
            }
        }
        if action == Action::AllIn || self.players[seat].stack() == 0 {
            self.someone_all_in = true;
        }
        self.log_action(pos, action, wager);
        Ok(())
    }

    fn ask_amount(&mut self, pos: Position, minimum: u32, maximum: u32) -> Result<u32, GameError> {
        let pot = self.pot;
        let amount = self.players[pos.index()]
            .strategy_mut()
            .choose_amount(minimum, maximum, pot)?;
        validate_amount(amount, minimum, maximum)
    }

    fn log_action(&mut self, pos: Position, action: Action, amount: u32) {
        let symbol = match action {
            Action::Bet | Action::Raise | Action::AllIn if self.imbalance > 0 => 'B',
            Action::Bet | Action::Raise | Action::AllIn => 'C',
            other => other.trail_symbol(),
        };
        if let Some(i) = self.street.betting_index() {
            self.trails[i].push(symbol);
        }
        self.nb_actions += 1;
        debug!(
            street = %self.street,
            position = %pos,
            action = %action,
            amount,
            pot = self.pot,
            imbalance = self.imbalance,
            "action enforced"
        );
        self.actions.push(ActionRecord {
            position: pos,
            street: self.street,
            action,
            amount,
        });
        let line = match action {
            Action::Check | Action::Fold => format!("{}: {}", self.label(pos), action),
            _ => format!("{}: {} {}", self.label(pos), action, amount),
        };
        self.history.push(line);
    }

    fn fold(&mut self, folder: Position) -> Result<(), GameError> {
        let winner = folder.other();
        let pot = self.pot;
        // what the folder put in, which is also what the winner gains
        let lost = i64::from((pot - self.imbalance) / 2);
        self.players[winner.index()].win_pot(pot);
        self.hero_reward = if folder == self.hero { -lost } else { lost };
        self.imbalance = 0;
        self.hand_over = true;
        self.winners = vec![winner];
        debug!(winner = %winner, pot, reward = self.hero_reward, "hand won by fold");
        let line = format!("{} wins {}", self.label(winner), pot);
        self.history.push(line);
        Ok(())
    }

    /// Moves the hand forward after an action: short-circuit to showdown when
    /// no more betting is possible, close the street, or pass the turn.
    fn advance(&mut self) -> Result<(), GameError> {
        if self.hand_over {
            return Ok(());
        }
        if self.someone_all_in && self.imbalance == 0 {
            debug!(street = %self.street, "all-in, running out the board");
            while self.street != Street::Showdown {
                self.next_street()?;
            }
            return Ok(());
        }
        if self.nb_actions >= 2 && self.imbalance == 0 {
            self.next_street()?;
        }
        Ok(())
    }

    fn next_street(&mut self) -> Result<(), GameError> {
        self.street = self.street.next();
        self.imbalance = 0;
        self.nb_actions = 0;
        let dealt = match self.street {
            Street::Flop => &self.board[0..3],
            Street::Turn => &self.board[3..4],
            Street::River => &self.board[4..5],
            Street::PreFlop | Street::Showdown => &[][..],
        };
        for hand in self.hands.iter_mut() {
            hand.add_public_cards(dealt);
        }
        debug!(street = %self.street, pot = self.pot, "street opened");
        if !dealt.is_empty() {
            let board: Vec<String> = self.board[..self.street.board_len()]
                .iter()
                .map(Card::to_string)
                .collect();
            let line = format!(
                "*** {} *** [{}]",
                self.street.to_string().to_uppercase(),
                board.join(" ")
            );
            self.history.push(line);
        }
        if self.street == Street::Showdown {
            self.showdown()?;
        }
        Ok(())
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        for hand in self.hands.iter_mut() {
            hand.update_best_combination()?;
        }
        let hero = self.hero;
        let villain = hero.other();
        let outcome = compare_two_hands(&self.hands[hero.index()], &self.hands[villain.index()])?;
        let pot = self.pot;
        let half = i64::from(pot / 2);
        match outcome {
            Winner::Hand1 => {
                self.players[hero.index()].win_pot(pot);
                self.hero_reward = half;
                self.winners = vec![hero];
            }
            Winner::Hand2 => {
                self.players[villain.index()].win_pot(pot);
                self.hero_reward = -half;
                self.winners = vec![villain];
            }
            Winner::Draw => {
                self.players[hero.index()].split_pot(pot);
                self.players[villain.index()].split_pot(pot);
                self.hero_reward = 0;
                self.winners = vec![Position::Button, Position::BigBlind];
            }
        }
        let describe = |pos: Position| {
            let hand = &self.hands[pos.index()];
            let hole = hand.private_cards();
            format!(
                "{} shows {} {} ({})",
                self.label(pos),
                hole[0],
                hole[1],
                hand.human_readable_rank().unwrap_or("unknown")
            )
        };
        let lines = [describe(Position::Button), describe(Position::BigBlind)];
        self.history.extend(lines);
        self.showdown_notes = Some(match outcome {
            Winner::Draw => "split pot".to_string(),
            _ => format!(
                "{} vs {}",
                self.hands[self.winners[0].index()]
                    .human_readable_rank()
                    .unwrap_or("unknown"),
                self.hands[self.winners[0].other().index()]
                    .human_readable_rank()
                    .unwrap_or("unknown")
            ),
        });
        let summary = match outcome {
            Winner::Draw => format!("Split pot of {}", pot),
            _ => format!("{} wins {}", self.label(self.winners[0]), pot),
        };
        debug!(?outcome, pot, reward = self.hero_reward, "showdown");
        self.history.push(summary);
        self.imbalance = 0;
        self.hand_over = true;
        Ok(())
    }

    /// Asks strategies for decisions until `stop_at` is on turn or the hand
    /// ends. `None` plays the hand to the end.
    fn drive(&mut self, stop_at: Option<Position>) -> Result<(), GameError> {
        while !self.hand_over {
            let pos = self.active();
            if Some(pos) == stop_at {
                break;
            }
            let legal = self.possible_actions();
            let ctx = self.decision_context(pos);
            let action = self.players[pos.index()]
                .strategy_mut()
                .decide(&legal, &ctx)?;
            if !legal.contains(&action) {
                return Err(GameError::IllegalAction { action, legal });
            }
            self.enforce(pos, action)?;
            self.advance()?;
        }
        Ok(())
    }

    pub fn decision_context(&self, pos: Position) -> DecisionContext {
        let trail = self
            .street
            .betting_index()
            .map(|i| self.trails[i].clone())
            .unwrap_or_default();
        DecisionContext {
            street: self.street,
            position: pos,
            stack: self.players[pos.index()].stack(),
            opponent_stack: self.players[pos.other().index()].stack(),
            pot: self.pot,
            imbalance: self.imbalance,
            big_blind: self.config.big_blind,
            hole_cards: self.hands[pos.index()].private_cards(),
            community_cards: self.community_cards().to_vec(),
            trail,
        }
    }

    /// Snapshot of the table from the hero's seat.
    pub fn state_vector(&self) -> Result<StateVector, GameError> {
        let hero = self.hero;
        let hole = self.hands[hero.index()].private_cards();
        let mut community = [0u8; 5];
        for (slot, card) in community.iter_mut().zip(self.community_cards()) {
            *slot = card.ordinal();
        }
        let mut trails = [0u32; 4];
        for (code, trail) in trails.iter_mut().zip(&self.trails) {
            *code = action_trail_code(trail)?;
        }
        Ok(StateVector {
            stack: self.players[hero.index()].stack(),
            opponent_stack: self.players[hero.other().index()].stack(),
            position: u8::from(hero == Position::BigBlind),
            hole_cards: [hole[0].ordinal(), hole[1].ordinal()],
            community_cards: community,
            trails,
            pot: self.pot,
        })
    }

    fn transition(&self) -> Result<Transition, GameError> {
        Ok(Transition {
            state: self.state_vector()?,
            reward: if self.hand_over { self.hero_reward } else { 0 },
            hand_over: self.hand_over,
        })
    }

    fn label(&self, pos: Position) -> String {
        format!("{} ({})", self.players[pos.index()].name(), pos)
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.board[..self.street.board_len()]
    }

    /// Chips in the pot. After the hand it reports the pot that was settled.
    pub fn pot_size(&self) -> u32 {
        self.pot
    }

    pub fn imbalance(&self) -> u32 {
        self.imbalance
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn hand_over(&self) -> bool {
        self.hand_over
    }

    pub fn someone_all_in(&self) -> bool {
        self.someone_all_in
    }

    pub fn hero_position(&self) -> Position {
        self.hero
    }

    pub fn hero_reward(&self) -> i64 {
        self.hero_reward
    }

    pub fn config(&self) -> &HandConfig {
        &self.config
    }

    /// Seats indexed by [`Position::index`].
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, pos: Position) -> &Player {
        &self.players[pos.index()]
    }

    pub fn hand(&self, pos: Position) -> &Hand {
        &self.hands[pos.index()]
    }

    /// Stacks before the blinds, indexed by seat.
    pub fn initial_stacks(&self) -> [u32; 2] {
        self.initial_stacks
    }

    pub fn trail(&self, street: Street) -> &str {
        street
            .betting_index()
            .map(|i| self.trails[i].as_str())
            .unwrap_or("")
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Human-readable log of the hand from the hero's point of view.
    pub fn hand_history(&self) -> String {
        self.history.join("\n")
    }

    /// Machine-readable record of the hand.
    pub fn record(&self, hand_id: String, seed: Option<u64>) -> HandRecord {
        let result = self.hand_over.then(|| match self.winners.as_slice() {
            [single] => format!("{} wins {}", single, self.pot),
            _ => format!("split {}", self.pot),
        });
        let showdown = self.showdown_notes.as_ref().map(|notes| ShowdownInfo {
            winners: self.winners.clone(),
            notes: Some(notes.clone()),
        });
        HandRecord {
            hand_id,
            seed,
            hand_number: self.config.hand_number,
            limit: self.config.limit,
            big_blind: self.config.big_blind,
            hero_position: self.hero,
            hole_cards: [
                self.hands[0].private_cards(),
                self.hands[1].private_cards(),
            ],
            actions: self.actions.clone(),
            board: self.community_cards().to_vec(),
            result,
            hero_reward: self.hero_reward,
            ts: None,
            showdown,
        }
    }

    /// Starting-hand label of a seat, e.g. `"AKs"`.
    pub fn starting_hand(&self, pos: Position) -> String {
        preflop_notation(self.hands[pos.index()].private_cards())
    }

    /// Gives the players back as `[hero, villain]`.
    pub fn into_players(self) -> [Player; 2] {
        let [button, big_blind] = self.players;
        match self.hero {
            Position::Button => [button, big_blind],
            Position::BigBlind => [big_blind, button],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::player::Strategy;
    use std::collections::VecDeque;

    /// Plays a scripted list of actions, then falls back to the first legal one.
    struct Scripted(VecDeque<Action>);

    impl Strategy for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn decide(&mut self, legal: &[Action], _ctx: &DecisionContext) -> Result<Action, GameError> {
            Ok(self.0.pop_front().unwrap_or(legal[0]))
        }
    }

    fn player(name: &str, stack: u32, script: &[Action]) -> Player {
        Player::new(name, stack, Box::new(Scripted(script.iter().copied().collect())))
    }

    fn cards(s: &str) -> [Card; 9] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    // BB: Ac Ad, SB: 7c 2d, board Kh 9s 4c 3d 8h
    const DEAL: &str = "Ac Ad 7c 2d Kh 9s 4c 3d 8h";

    fn round(hero_pos: Position, stacks: [u32; 2], villain_script: &[Action]) -> BettingRound {
        let config = HandConfig {
            big_blind: 10,
            limit: BettingLimit::FixedLimit,
            hand_number: 1,
        };
        BettingRound::new(
            hero_pos,
            [player("hero", stacks[0], &[]), player("villain", stacks[1], villain_script)],
            config,
            cards(DEAL),
        )
    }

    #[test]
    fn blinds_and_first_decision() {
        let mut r = round(Position::Button, [100, 100], &[]);
        let t = r.initial_step().unwrap();
        assert!(!t.hand_over);
        assert_eq!(r.pot_size(), 15);
        assert_eq!(r.imbalance(), 5);
        assert_eq!(r.possible_actions(), vec![Action::Call, Action::Raise, Action::Fold]);
        assert_eq!(t.state.stack, 95);
        assert_eq!(t.state.position, 0);
        assert_eq!(t.state.community_cards, [0; 5]);
    }

    #[test]
    fn street_trail_and_board() {
        // villain checks behind pre-flop
        let mut r = round(Position::Button, [100, 100], &[Action::Check]);
        r.initial_step().unwrap();
        let t = r.step(Action::Call).unwrap();
        assert_eq!(r.street(), Street::Flop);
        assert_eq!(r.trail(Street::PreFlop), "CC");
        // big blind acts first post-flop; scripted villain falls back to check
        assert_eq!(r.trail(Street::Flop), "C");
        assert_eq!(r.community_cards().len(), 3);
        assert!(t.state.community_cards[..3].iter().all(|&c| c > 0));
        assert_eq!(t.state.community_cards[3], 0);
        assert_eq!(t.state.trails[0], action_trail_code("CC").unwrap());
    }

    #[test]
    fn illegal_action_leaves_state_untouched() {
        let mut r = round(Position::Button, [100, 100], &[]);
        r.initial_step().unwrap();
        let before = (r.pot_size(), r.imbalance(), r.player(Position::Button).stack());
        let err = r.step(Action::Check).unwrap_err();
        assert!(matches!(err, GameError::IllegalAction { action: Action::Check, .. }));
        assert_eq!(before, (r.pot_size(), r.imbalance(), r.player(Position::Button).stack()));
    }

    #[test]
    fn hero_fold_preflop_costs_small_blind() {
        let mut r = round(Position::Button, [100, 100], &[]);
        r.initial_step().unwrap();
        let t = r.step(Action::Fold).unwrap();
        assert!(t.hand_over);
        assert_eq!(t.reward, -5);
        assert_eq!(r.player(Position::BigBlind).stack(), 105);
        assert_eq!(r.trail(Street::PreFlop), "F");
        assert!(r.step(Action::Call).is_err());
    }

    #[test]
    fn all_in_short_stack_refund() {
        // villain (BB) has 100, hero (SB) only 12: hero raise-shoves, villain calls
        let mut r = round(Position::Button, [12, 100], &[Action::Call]);
        r.initial_step().unwrap();
        assert_eq!(r.possible_actions(), vec![Action::Call, Action::Raise, Action::Fold]);
        let t = r.step(Action::Raise).unwrap();
        assert!(t.hand_over);
        assert_eq!(r.street(), Street::Showdown);
        // aces hold
        assert_eq!(t.reward, -12);
        let total: u32 = r.players().iter().map(Player::stack).sum();
        assert_eq!(total, 112);
    }

    #[test]
    fn blind_all_in_short_circuits() {
        // hero in the small blind with fewer chips than the small blind
        let mut r = round(Position::Button, [4, 100], &[]);
        let t = r.initial_step().unwrap();
        assert!(t.hand_over);
        assert_eq!(r.pot_size(), 8);
        assert_eq!(r.community_cards().len(), 5);
        assert_eq!(t.reward, -4);
        assert_eq!(r.player(Position::BigBlind).stack(), 104);
    }

    #[test]
    fn big_blind_partial_all_in_faces_call_or_fold() {
        let mut r = round(Position::Button, [100, 8], &[]);
        r.initial_step().unwrap();
        assert_eq!(r.imbalance(), 3);
        assert_eq!(r.possible_actions(), vec![Action::Call, Action::Fold]);
        let t = r.step(Action::Call).unwrap();
        assert!(t.hand_over);
        assert_eq!(r.pot_size(), 16);
    }

    #[test]
    fn into_players_restores_order() {
        let r = round(Position::BigBlind, [100, 90], &[]);
        let [hero, villain] = r.into_players();
        assert_eq!(hero.name(), "hero");
        assert_eq!(villain.stack(), 90);
    }

    #[test]
    fn record_lists_actions_by_street() {
        let mut r = round(Position::Button, [100, 100], &[]);
        r.initial_step().unwrap();
        r.step(Action::Call).unwrap();
        let rec = r.record("20250101-000001".to_string(), Some(3));
        let actions: Vec<_> = rec
            .actions
            .iter()
            .map(|a| (a.position, a.street, a.action, a.amount))
            .collect();
        assert_eq!(
            actions,
            vec![
                (Position::Button, Street::PreFlop, Action::Call, 5),
                (Position::BigBlind, Street::PreFlop, Action::Check, 0),
                (Position::BigBlind, Street::Flop, Action::Check, 0),
            ]
        );
        assert_eq!(rec.board.len(), 3);
        assert_eq!(rec.result, None);
        assert_eq!(rec.seed, Some(3));
    }

    /// Fails on its first decision, then takes the first legal action.
    struct FailsOnce(bool);

    impl Strategy for FailsOnce {
        fn name(&self) -> &str {
            "fails-once"
        }

        fn decide(&mut self, legal: &[Action], _ctx: &DecisionContext) -> Result<Action, GameError> {
            if !self.0 {
                self.0 = true;
                return Err(GameError::Strategy("no answer".into()));
            }
            Ok(legal[0])
        }
    }

    #[test]
    fn failed_villain_keeps_its_turn_until_play_out() {
        let config = HandConfig {
            big_blind: 10,
            limit: BettingLimit::FixedLimit,
            hand_number: 1,
        };
        let villain = Player::new("villain", 100, Box::new(FailsOnce(false)));
        let mut r = BettingRound::new(
            Position::Button,
            [player("hero", 100, &[]), villain],
            config,
            cards(DEAL),
        );
        r.initial_step().unwrap();
        assert_eq!(
            r.step(Action::Call),
            Err(GameError::Strategy("no answer".into()))
        );
        assert_eq!(r.active(), Position::BigBlind);
        assert_eq!(r.pot_size(), 20);
        assert_eq!(
            r.step(Action::Check),
            Err(GameError::NotYourTurn(Position::BigBlind))
        );

        let t = r.play_out().unwrap();
        assert!(t.hand_over);
        let total: u32 = r.players().iter().map(Player::stack).sum();
        assert_eq!(total, 200);
    }
}
