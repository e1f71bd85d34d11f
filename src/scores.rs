//! High-score records and their persistence.
//!
//! The list is append-then-sort: every finished round is kept, highest score
//! first, with no cap and no de-duplication.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    /// Round length in milliseconds.
    pub time: u64,
    pub score: u32,
}

/// Append `entry` and re-sort by score, highest first. The sort is stable, so
/// ties keep their previous relative order with the newest entry last.
pub fn record(scores: &mut Vec<HighScore>, entry: HighScore) {
    scores.push(entry);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Decode a stored list. Anything unreadable counts as an empty list.
pub fn parse_scores(text: &str) -> Vec<HighScore> {
    match serde_json::from_str(text) {
        Ok(scores) => scores,
        Err(e) => {
            tracing::warn!("ignoring malformed high-score data: {e}");
            Vec::new()
        }
    }
}

/// Where high scores live between rounds.
pub trait ScoreStore {
    /// Never fails: missing or malformed data loads as an empty list.
    fn load(&self) -> Vec<HighScore>;
    fn save(&self, scores: &[HighScore]) -> Result<(), StoreError>;
}

/// JSON array of `{"time", "score"}` objects in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.survival_shooter_scores.json`, or the working directory when
    /// `HOME` is unset.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".survival_shooter_scores.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Vec<HighScore> {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_scores(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!("could not read {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    fn save(&self, scores: &[HighScore]) -> Result<(), StoreError> {
        let text = serde_json::to_string(scores)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
