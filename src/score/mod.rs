//! Persistent win tally and the key-value port it is stored through.

mod leaderboard;
mod record;
mod store;

pub use leaderboard::{read_record, write_record, Leaderboard, SCORE_KEY};
pub use record::ScoreRecord;
pub use store::{FileStore, KeyValueStore, MemoryStore};
