//! The per-player high-score table and its JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::log::warn;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while reading or writing the high-score file.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("failed to access high scores at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high scores at {} are not valid JSON: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode high scores for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Best score per player name. Entries only ever go up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    scores: BTreeMap<String, u32>,
}

impl HighScoreTable {
    /// Stores `score` for `player` if it beats their previous best.
    /// Returns whether the table changed.
    pub fn record(&mut self, player: &str, score: u32) -> bool {
        match self.scores.get_mut(player) {
            Some(best) if *best >= score => false,
            Some(best) => {
                *best = score;
                true
            }
            None => {
                self.scores.insert(player.to_string(), score);
                true
            }
        }
    }

    pub fn best(&self, player: &str) -> Option<u32> {
        self.scores.get(player).copied()
    }

    /// Up to `limit` entries, highest score first, ties by name.
    pub fn ranked(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut entries: Vec<(&str, u32)> = self
            .scores
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

/// A stored value: a bare score, or the older `[score, ...]` form.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredScore {
    Legacy(Vec<Value>),
    Plain(Value),
}

impl StoredScore {
    fn into_score(self) -> Option<u32> {
        let value = match self {
            StoredScore::Legacy(list) => list.into_iter().next()?,
            StoredScore::Plain(value) => value,
        };
        if let Some(score) = value.as_u64() {
            return u32::try_from(score).ok();
        }
        // Older files may hold floats; keep the integer part.
        value
            .as_f64()
            .filter(|score| score.is_finite() && *score >= 0.0 && *score <= f64::from(u32::MAX))
            .map(|score| score as u32)
    }
}

/// Flat JSON file holding a [`HighScoreTable`].
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table. A missing file is an empty table; entries that are not
    /// a non-negative score are skipped.
    pub fn load(&self) -> Result<HighScoreTable, ScoreStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(HighScoreTable::default());
            }
            Err(source) => {
                return Err(ScoreStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let stored: BTreeMap<String, StoredScore> =
            serde_json::from_str(&raw).map_err(|source| ScoreStoreError::Decode {
                path: self.path.clone(),
                source,
            })?;

        let mut table = HighScoreTable::default();
        for (player, value) in stored {
            match value.into_score() {
                Some(score) => {
                    table.scores.insert(player, score);
                }
                None => warn!(
                    "skipping high score for {player:?} in {}: not a non-negative integer",
                    self.path.display()
                ),
            }
        }
        Ok(table)
    }

    /// Writes the table, creating the parent directory if needed.
    pub fn save(&self, table: &HighScoreTable) -> Result<(), ScoreStoreError> {
        let io_err = |source: io::Error| ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string(&table.scores).map_err(|source| ScoreStoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (HighScoreStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("high_scores.json"));
        (store, dir)
    }

    #[test]
    fn record_only_moves_up() {
        let mut table = HighScoreTable::default();
        assert!(table.record("ada", 40));
        assert!(!table.record("ada", 30));
        assert!(!table.record("ada", 40));
        assert_eq!(table.best("ada"), Some(40));
        assert!(table.record("ada", 70));
        assert_eq!(table.best("ada"), Some(70));
        assert_eq!(table.best("bob"), None);
    }

    #[test]
    fn ranked_sorts_by_score_then_name() {
        let mut table = HighScoreTable::default();
        for (name, score) in [("eve", 10), ("bob", 50), ("ada", 50), ("cy", 90), ("dan", 0), ("fay", 20)] {
            table.record(name, score);
        }
        assert_eq!(
            table.ranked(5),
            vec![("cy", 90), ("ada", 50), ("bob", 50), ("fay", 20), ("eve", 10)]
        );
        assert_eq!(table.ranked(1), vec![("cy", 90)]);
    }

    #[test]
    fn missing_file_is_empty_table() {
        let (store, _dir) = test_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let (store, _dir) = test_store();
        let mut table = HighScoreTable::default();
        table.record("ada", 120);
        table.record("bob", 30);
        store.save(&table).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"ada":120,"bob":30}"#);
        assert_eq!(store.load().unwrap(), table);
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("nested").join("scores.json"));
        store.save(&HighScoreTable::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn legacy_list_values_are_read() {
        let (store, _dir) = test_store();
        fs::write(store.path(), r#"{"ada": [70, "2023-05-01"], "bob": 20, "cy": 15.0}"#).unwrap();
        let table = store.load().unwrap();
        assert_eq!(table.best("ada"), Some(70));
        assert_eq!(table.best("bob"), Some(20));
        assert_eq!(table.best("cy"), Some(15));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let (store, _dir) = test_store();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(ScoreStoreError::Decode { .. })));
    }

    #[test]
    fn bad_entries_are_skipped() {
        let (store, _dir) = test_store();
        fs::write(store.path(), r#"{"ada": 100, "bob": -1, "cy": [], "dan": "lots"}"#).unwrap();
        let table = store.load().unwrap();
        assert_eq!(table.best("ada"), Some(100));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn clearing_and_saving_empties_the_file() {
        let (store, _dir) = test_store();
        let mut table = HighScoreTable::default();
        table.record("ada", 10);
        store.save(&table).unwrap();
        table.clear();
        store.save(&table).unwrap();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{}");
    }
}
