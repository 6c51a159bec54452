//! Portable JSON snapshot of an attempt store.

use chrono::{DateTime, Utc};
use pilot_core::model::{ProblemResult, SessionStats};
use pilot_core::streak::StreakState;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::repository::{AttemptStore, StorageError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub sessions: Vec<SessionStats>,
    pub results: Vec<ProblemResult>,
    #[serde(default)]
    pub streak: StreakState,
    pub exported_at: DateTime<Utc>,
}

impl ExportBundle {
    /// Snapshot everything `store` currently lists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn capture(
        store: &dyn AttemptStore,
        exported_at: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        let mut sessions = store.list_sessions().await?;
        let mut results = store.list_results().await?;
        // oldest first, whatever order the backend listed in
        sessions.sort_by_key(SessionStats::date);
        results.sort_by_key(|r| r.timestamp);

        Ok(Self {
            sessions,
            results,
            streak: store.streak_state().await?,
            exported_at,
        })
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string_pretty(self).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Parse a bundle previously produced by [`ExportBundle::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON or sessions
    /// with inconsistent counts.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Replace the contents of `store` with this bundle.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if clearing or writing fails. The store may be
    /// partially written in that case.
    pub async fn restore(&self, store: &dyn AttemptStore) -> Result<(), StorageError> {
        store.clear().await?;
        store.append_sessions(&self.sessions).await?;
        store.append_results(&self.results).await?;
        store.save_streak_state(&self.streak).await?;
        info!(
            sessions = self.sessions.len(),
            results = self.results.len(),
            "attempt log restored from export"
        );
        Ok(())
    }
}
