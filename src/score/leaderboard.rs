use tracing::{info, warn};

use crate::error::StorageError;
use crate::game::{GameMode, GameResult};

use super::record::ScoreRecord;
use super::store::KeyValueStore;

/// Key the score record is stored under.
pub const SCORE_KEY: &str = "connect-four-leaderboard";

/// Read the score record from `store`. A missing, unreadable or malformed
/// record reads as all zeros.
pub fn read_record<S: KeyValueStore + ?Sized>(store: &S) -> ScoreRecord {
    match store.get(SCORE_KEY) {
        Ok(None) => ScoreRecord::default(),
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "malformed score record, starting from zero");
            ScoreRecord::default()
        }),
        Err(e) => {
            warn!(error = %e, "could not read score record, starting from zero");
            ScoreRecord::default()
        }
    }
}

/// Serialize `record` and store it under [`SCORE_KEY`].
pub fn write_record<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &ScoreRecord,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(record)?;
    store.put(SCORE_KEY, &json)
}

/// The live score record together with the store it persists to.
pub struct Leaderboard<S> {
    store: S,
    scores: ScoreRecord,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn load(store: S) -> Self {
        let scores = read_record(&store);
        info!(?scores, "loaded leaderboard");
        Leaderboard { store, scores }
    }

    pub fn scores(&self) -> ScoreRecord {
        self.scores
    }

    /// Count a finished game and persist the record if it changed.
    ///
    /// The in-memory record is updated even when the write fails, so the
    /// next successful write carries it.
    pub fn record_result(
        &mut self,
        result: &GameResult,
        mode: GameMode,
    ) -> Result<ScoreRecord, StorageError> {
        if self.scores.record_result(result, mode) {
            write_record(&mut self.store, &self.scores)?;
            info!(scores = ?self.scores, "leaderboard updated");
        }
        Ok(self.scores)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
