use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{Action, Position};
use crate::round::Street;
use crate::rules::BettingLimit;

/// Records a single player action during a hand.
/// Associates the action with the seat and the street when it occurred.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that acted
    pub position: Position,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action taken by the player
    pub action: Action,
    /// Chips put into the pot by this action (0 for check and fold)
    pub amount: u32,
}

/// Information about the showdown phase when hands are revealed.
/// Records which seats won and any relevant notes about the outcome.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats that won the pot (both on a split)
    pub winners: Vec<Position>,
    /// Optional notes about the showdown (e.g., "split pot", "Flush vs Straight")
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed of the game that dealt the hand
    #[serde(default)]
    pub seed: Option<u64>,
    /// One-based index of the hand within its game
    pub hand_number: u32,
    pub limit: BettingLimit,
    pub big_blind: u32,
    /// Seat occupied by the hero in this hand
    pub hero_position: Position,
    /// Hole cards indexed by seat (button first)
    pub hole_cards: [[Card; 2]; 2],
    /// Chronological list of all player actions, blinds excluded
    pub actions: Vec<ActionRecord>,
    /// Community cards that were dealt (up to 5 cards)
    pub board: Vec<Card>,
    /// Hand result summary (e.g. "BB wins 40")
    pub result: Option<String>,
    /// Hero's net chip change for the hand
    pub hero_reward: i64,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Showdown information if hand went to showdown
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends hand records to a JSONL file and hands out sequential ids.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that writes nowhere, with a fixed date for predictable ids.
    pub fn in_memory(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
