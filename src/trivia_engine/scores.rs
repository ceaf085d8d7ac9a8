//! Score ledger: best score per user and per (region, topic), plus a global
//! leaderboard, persisted as one JSON file.
//!
//! ## File format
//!
//! ```json
//! {
//!   "version": 1,
//!   "per_user_bests": { "Ann": { "europe:capitals": 7 } },
//!   "leaderboard": { "europe:capitals": { "score": 7, "holder": "Ann" } }
//! }
//! ```
//!
//! Stored scores never decrease: a new score replaces the old one only when
//! strictly greater. Saves go to a sibling temp file that is then renamed
//! over the target, so a crash mid-write leaves the previous file intact.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::trivia_engine::{
    error::PersistenceError,
    models::{Region, TopicSelection},
};

/// Current score file version.
const LEDGER_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Keys and entries
// ---------------------------------------------------------------------------

/// Scores are tracked separately for each (region, topic) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ScoreKey {
    pub region: Region,
    pub topic: TopicSelection,
}

impl ScoreKey {
    pub fn new(region: Region, topic: TopicSelection) -> Self {
        ScoreKey { region, topic }
    }
}

impl fmt::Display for ScoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.region.key(), self.topic.key())
    }
}

impl From<ScoreKey> for String {
    fn from(key: ScoreKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ScoreKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let (region, topic) = s
            .split_once(':')
            .ok_or_else(|| format!("score key {s:?} has no ':'"))?;
        let region = Region::from_key(region).ok_or_else(|| format!("unknown region in {s:?}"))?;
        let topic = TopicSelection::from_key(topic).ok_or_else(|| format!("unknown topic in {s:?}"))?;
        Ok(ScoreKey { region, topic })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub holder: String,
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStore {
    version: u32,
    #[serde(default)]
    per_user_bests: BTreeMap<String, BTreeMap<ScoreKey, u32>>,
    #[serde(default)]
    leaderboard: BTreeMap<ScoreKey, LeaderboardEntry>,
}

impl Default for RecordStore {
    fn default() -> Self {
        RecordStore {
            version: LEDGER_VERSION,
            per_user_bests: BTreeMap::new(),
            leaderboard: BTreeMap::new(),
        }
    }
}

impl RecordStore {
    /// Read the store at `path`; a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no score file at {}, starting fresh", path.display());
                return Ok(RecordStore::default());
            }
            Err(e) => return Err(e.into()),
        };
        let store: RecordStore = serde_json::from_str(&content)?;
        if store.version != LEDGER_VERSION {
            return Err(PersistenceError::VersionMismatch {
                expected: LEDGER_VERSION,
                found: store.version,
            });
        }
        info!(
            "loaded scores for {} users from {}",
            store.per_user_bests.len(),
            path.display()
        );
        Ok(store)
    }

    /// Write the store to `path` via a temp file + rename.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(self)?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        fs::write(&tmp, content)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        info!("saved scores to {}", path.display());
        Ok(())
    }

    pub fn personal_best(&self, username: &str, key: ScoreKey) -> Option<u32> {
        self.per_user_bests.get(username)?.get(&key).copied()
    }

    pub fn record(&self, key: ScoreKey) -> Option<&LeaderboardEntry> {
        self.leaderboard.get(&key)
    }

    /// All of one user's bests, keyed by (region, topic).
    pub fn user_bests(&self, username: &str) -> Option<&BTreeMap<ScoreKey, u32>> {
        self.per_user_bests.get(username)
    }

    /// Apply a finished round and report how it compares with what was stored.
    ///
    /// Either stored value is replaced only when `score` is strictly greater
    /// (or nothing was stored), so replaying an update is a no-op.
    pub fn update(&mut self, username: &str, key: ScoreKey, score: u32) -> ScoreReport {
        let report = ScoreReport {
            username: username.to_string(),
            key,
            score,
            previous_best: self.personal_best(username, key),
            previous_record: self.record(key).cloned(),
        };

        let best = self
            .per_user_bests
            .entry(username.to_string())
            .or_default()
            .entry(key)
            .or_insert(score);
        if score > *best {
            *best = score;
        }

        let beats_record = self.leaderboard.get(&key).map_or(true, |e| score > e.score);
        if beats_record {
            self.leaderboard.insert(key, LeaderboardEntry {
                score,
                holder: username.to_string(),
            });
        }
        report
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalStanding {
    FirstTime,
    NewBest,
    TiedBest,
    BelowBest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStanding {
    /// Strictly above the stored record (or no record existed) held by someone else.
    BeatRecord,
    /// Strictly above a record the player already held.
    RemainsHolder,
    BelowRecordAsHolder,
    BelowRecordAsNonHolder,
}

/// How one finished round compares with the ledger before it was updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub username: String,
    pub key: ScoreKey,
    pub score: u32,
    pub previous_best: Option<u32>,
    pub previous_record: Option<LeaderboardEntry>,
}

impl ScoreReport {
    pub fn personal_standing(&self) -> PersonalStanding {
        match self.previous_best {
            None => PersonalStanding::FirstTime,
            Some(best) if self.score > best => PersonalStanding::NewBest,
            Some(best) if self.score == best => PersonalStanding::TiedBest,
            Some(_) => PersonalStanding::BelowBest,
        }
    }

    pub fn record_standing(&self) -> RecordStanding {
        match &self.previous_record {
            None => RecordStanding::BeatRecord,
            Some(rec) => match (self.score > rec.score, rec.holder == self.username) {
                (true, false)  => RecordStanding::BeatRecord,
                (true, true)   => RecordStanding::RemainsHolder,
                (false, true)  => RecordStanding::BelowRecordAsHolder,
                (false, false) => RecordStanding::BelowRecordAsNonHolder,
            },
        }
    }

    /// User-facing summary, one sentence per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "You scored {} points this round, playing the {} region and {} category.",
            self.score, self.key.region, self.key.topic
        )];

        lines.push(match self.previous_best {
            None => "This is your first time playing this region and category.".to_string(),
            Some(best) => match self.personal_standing() {
                PersonalStanding::NewBest => format!(
                    "You beat your previous high score of {best} points for this region and topic!"
                ),
                PersonalStanding::TiedBest => format!(
                    "You matched your previous high score of {best} points for this region and topic."
                ),
                _ => format!("Your high score for this region and topic is {best}."),
            },
        });

        lines.push(match &self.previous_record {
            None => format!(
                "You set the first record score of {} for this region and topic!",
                self.score
            ),
            Some(rec) => match self.record_standing() {
                RecordStanding::BeatRecord => {
                    format!("You beat {}'s high score of {}!", rec.holder, rec.score)
                }
                RecordStanding::RemainsHolder => "You remain the record holder!".to_string(),
                RecordStanding::BelowRecordAsHolder => {
                    format!("You hold the record score of {} points.", rec.score)
                }
                RecordStanding::BelowRecordAsNonHolder => {
                    format!("The record score of {} is held by {}.", rec.score, rec.holder)
                }
            },
        });
        lines
    }
}
