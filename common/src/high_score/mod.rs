mod store;
mod tracker;

pub use store::{FileHighScoreStore, HighScoreRecord, HighScoreStore, InMemoryHighScoreStore};
pub use tracker::HighScoreTracker;
