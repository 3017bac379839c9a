//! Scores plugin - keeps the persisted high-score table in step with finished matches.

mod store;

pub use store::*;

use bevy::prelude::*;
use std::path::PathBuf;

use crate::game::{GameOverEvent, GameSet, format_elapsed};

/// Plugin for high-score loading and saving.
pub struct ScoresPlugin {
    pub path: PathBuf,
}

impl Plugin for ScoresPlugin {
    fn build(&self, app: &mut App) {
        let mut scores = HighScores::new(HighScoreStore::new(self.path.clone()));
        scores.reload();

        app.insert_resource(scores)
            .add_systems(Update, record_final_score.in_set(GameSet::Scores));
    }
}

/// In-memory table plus where it lives on disk.
#[derive(Resource)]
pub struct HighScores {
    pub table: HighScoreTable,
    store: HighScoreStore,
    /// Set while the file on disk could not be read; it is not overwritten then.
    load_failed: bool,
}

impl HighScores {
    pub fn new(store: HighScoreStore) -> Self {
        HighScores {
            table: HighScoreTable::default(),
            store,
            load_failed: false,
        }
    }

    /// Re-reads the file. On failure the in-memory table is kept.
    pub fn reload(&mut self) {
        match self.store.load() {
            Ok(table) => {
                debug!(
                    "loaded {} high score(s) from {}",
                    table.len(),
                    self.store.path().display()
                );
                self.table = table;
                self.load_failed = false;
            }
            Err(err) => {
                warn!("keeping in-memory high scores: {err}");
                self.load_failed = true;
            }
        }
    }

    /// Records a finished match and writes the table if it changed.
    pub fn submit(&mut self, player: &str, score: u32) -> bool {
        let improved = self.table.record(player, score);
        if improved {
            self.persist();
        }
        improved
    }

    /// Forgets every entry, on disk too. This replaces an unreadable file.
    pub fn reset(&mut self) {
        self.table.clear();
        self.load_failed = false;
        self.persist();
        info!("high scores reset");
    }

    fn persist(&self) {
        if self.load_failed {
            warn!(
                "not saving high scores over unreadable {}",
                self.store.path().display()
            );
            return;
        }
        if let Err(err) = self.store.save(&self.table) {
            warn!("could not save high scores: {err}");
        }
    }
}

/// System to fold finished matches into the table.
fn record_final_score(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut high_scores: ResMut<HighScores>,
) {
    for event in game_over_reader.read() {
        let improved = high_scores.submit(&event.player, event.score);
        info!(
            "game over for {}: {} after {} with {} points{}",
            event.player,
            event.cause,
            format_elapsed(event.elapsed),
            event.score,
            if improved { " (new personal best)" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn submit_persists_only_improvements() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.json"));
        let mut scores = HighScores::new(store.clone());

        assert!(scores.submit("ada", 30));
        assert_eq!(store.load().unwrap().best("ada"), Some(30));

        assert!(!scores.submit("ada", 20));
        assert_eq!(store.load().unwrap().best("ada"), Some(30));

        scores.reset();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn reload_keeps_table_when_file_is_broken() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        let mut scores = HighScores::new(HighScoreStore::new(&path));
        scores.submit("ada", 50);

        std::fs::write(&path, "{").unwrap();
        scores.reload();
        assert_eq!(scores.table.best("ada"), Some(50));
    }

    #[test]
    fn unreadable_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"ada": 100, "bob": "#).unwrap();

        let mut scores = HighScores::new(HighScoreStore::new(&path));
        scores.reload();
        assert!(scores.submit("cy", 10));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"ada": 100, "bob": "#);

        scores.reset();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn bad_entry_does_not_cost_other_players_their_scores() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores.json");
        std::fs::write(&path, r#"{"ada": 100, "bob": -1}"#).unwrap();

        let mut scores = HighScores::new(HighScoreStore::new(&path));
        scores.reload();
        scores.submit("cy", 10);

        let table = HighScoreStore::new(&path).load().unwrap();
        assert_eq!(table.best("ada"), Some(100));
        assert_eq!(table.best("cy"), Some(10));
        assert_eq!(table.best("bob"), None);
    }
}
