use chrono::Local;

use crate::log;
use super::{HighScoreRecord, HighScoreStore};

/// Keeps the best score in memory and persists it through the injected store.
/// Store failures are logged and never interrupt a game.
pub struct HighScoreTracker {
    store: Box<dyn HighScoreStore>,
    best: u32,
}

impl HighScoreTracker {
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let best = match store.load() {
            Ok(record) => record.map(|r| r.best_score).unwrap_or(0),
            Err(e) => {
                log!("Failed to load high score: {}", e);
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Returns true when `score` is a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        let record = HighScoreRecord {
            best_score: score,
            achieved_at: Local::now().to_rfc3339(),
        };
        if let Err(e) = self.store.save(&record) {
            log!("Failed to save high score: {}", e);
        } else {
            log!("New high score: {}", score);
        }
        true
    }
}
