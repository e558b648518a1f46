use std::fs;
use std::path::PathBuf;

use hupoker_engine::cards::{Card, Rank, Suit};
use hupoker_engine::errors::GameError;
use hupoker_engine::game::{GameConfig, HuGame};
use hupoker_engine::logger::{format_hand_id, ActionRecord, HandLogger, HandRecord, ShowdownInfo};
use hupoker_engine::player::{Action, DecisionContext, Player, Position, Strategy};
use hupoker_engine::round::Street;
use hupoker_engine::rules::BettingLimit;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("hupoker_{}_{}.jsonl", name, std::process::id()));
    p
}

fn sample_record() -> HandRecord {
    let card = |rank, suit| Card { suit, rank };
    HandRecord {
        hand_id: "20250102-000123".to_string(),
        seed: Some(42),
        hand_number: 3,
        limit: BettingLimit::FixedLimit,
        big_blind: 10,
        hero_position: Position::Button,
        hole_cards: [
            [card(Rank::Ace, Suit::Hearts), card(Rank::King, Suit::Hearts)],
            [card(Rank::Two, Suit::Clubs), card(Rank::Seven, Suit::Diamonds)],
        ],
        actions: vec![
            ActionRecord {
                position: Position::Button,
                street: Street::PreFlop,
                action: Action::Raise,
                amount: 15,
            },
            ActionRecord {
                position: Position::BigBlind,
                street: Street::PreFlop,
                action: Action::Call,
                amount: 10,
            },
        ],
        board: vec![
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Four, Suit::Spades),
        ],
        result: Some("SB wins 40".to_string()),
        hero_reward: 20,
        ts: None,
        showdown: Some(ShowdownInfo {
            winners: vec![Position::Button],
            notes: Some("Three of a kind vs One pair".to_string()),
        }),
    }
}

#[test]
fn hand_record_serializes_and_deserializes() {
    let rec = sample_record();
    let s = serde_json::to_string(&rec).expect("serialize");
    assert!(s.contains("\"pre-flop\""));
    assert!(s.contains("\"fixed-limit\""));
    let back: HandRecord = serde_json::from_str(&s).expect("deserialize");
    assert_eq!(rec, back);
}

#[test]
fn id_format_is_date_and_sequence() {
    assert_eq!(format_hand_id("20251231", 42), "20251231-000042");
}

#[test]
fn writes_jsonl_with_timestamp() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&sample_record()).expect("write");
    logger.write(&sample_record()).expect("write");
    let text = fs::read_to_string(&path).expect("read file");
    let _ = fs::remove_file(&path);
    assert!(text.ends_with('\n'));
    assert!(!text.contains('\r'));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let parsed: HandRecord = serde_json::from_str(lines[0]).expect("parse line");
    assert!(parsed.ts.is_some());
}

struct CheckCall;

impl Strategy for CheckCall {
    fn name(&self) -> &str {
        "check-call"
    }

    fn decide(&mut self, legal: &[Action], _ctx: &DecisionContext) -> Result<Action, GameError> {
        Ok(legal[0])
    }
}

#[test]
fn played_hand_produces_consistent_record() {
    let config = GameConfig {
        max_hands: 1,
        big_blind: 10,
        limit: BettingLimit::FixedLimit,
        seed: Some(77),
    };
    let mut game = HuGame::new(
        config,
        Player::new("hero", 100, Box::new(CheckCall)),
        Player::new("villain", 100, Box::new(CheckCall)),
    );
    let rec = game.play_hand().expect("hand");
    assert_eq!(rec.seed, Some(77));
    assert_eq!(rec.hand_number, 1);
    assert!(rec.hand_id.ends_with("-000001"));
    // check/call all the way: call, check, then two checks per street
    assert_eq!(rec.actions.len(), 8);
    assert_eq!(rec.board.len(), 5);
    assert!(rec.showdown.is_some());
    assert!(rec.result.is_some());
    assert!(matches!(rec.hero_reward, -10 | 0 | 10));
}
