//! Device-local attempt store.
//!
//! Each log lives in its own JSON file under a data directory:
//! `sessions.json`, `results.json` and `streak.json`. Only the newest
//! [`SESSION_LIMIT`] sessions and [`RESULT_LIMIT`] results are kept. A file
//! that is missing or not valid JSON reads as empty, and single entries that
//! fail validation are skipped. Appends refuse to run over a file they cannot
//! read.

use async_trait::async_trait;
use pilot_core::model::{ProblemResult, SessionStats};
use pilot_core::streak::StreakState;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::repository::{AttemptStore, RESULT_LIMIT, SESSION_LIMIT, StorageError};

const SESSIONS_FILE: &str = "sessions.json";
const RESULTS_FILE: &str = "results.json";
const STREAK_FILE: &str = "streak.json";

#[derive(Clone)]
pub struct LocalFileStore {
    dir: PathBuf,
    // read-modify-write cycles must not interleave
    write_lock: Arc<Mutex<()>>,
}

impl LocalFileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    async fn read_raw(&self, file: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path(file)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io(e)),
        }
    }

    /// Entries of a log file. A file that is not a JSON array reads as empty,
    /// and entries that fail to decode are skipped; I/O errors other than a
    /// missing file are returned.
    async fn read_log<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StorageError> {
        let Some(raw) = self.read_raw(file).await? else {
            return Ok(Vec::new());
        };
        let path = self.path(file);
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt attempt file, treating as empty");
                return Ok(Vec::new());
            }
        };

        let total = entries.len();
        let kept: Vec<T> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(path = %path.display(), index, error = %e, "skipping invalid entry");
                    None
                }
            })
            .collect();
        if kept.len() < total {
            debug!(kept = kept.len(), total, "attempt file had invalid entries");
        }
        Ok(kept)
    }

    /// [`Self::read_log`] for listing: unreadable files read as empty.
    async fn list_log<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        match self.read_log(file).await {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %self.path(file).display(), error = %e, "unreadable attempt file, treating as empty");
                Vec::new()
            }
        }
    }

    async fn read_streak(&self) -> StreakState {
        let path = self.path(STREAK_FILE);
        let raw = match self.read_raw(STREAK_FILE).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return StreakState::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable streak file, treating as empty");
                return StreakState::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "corrupt streak file, treating as empty");
            StreakState::default()
        })
    }

    async fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(io)?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        // write beside the target, then swap it in
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(io)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io)?;
        Ok(())
    }

    async fn remove(&self, file: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path(file)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io(e)),
        }
    }

    async fn push_results(&self, new: &[ProblemResult]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        // an unreadable file must not be replaced by the new entries alone
        let mut results: Vec<ProblemResult> = self.read_log(RESULTS_FILE).await?;
        results.extend_from_slice(new);
        keep_newest(&mut results, RESULT_LIMIT);
        self.write(RESULTS_FILE, &results).await?;
        debug!(added = new.len(), stored = results.len(), "results written");
        Ok(())
    }

    async fn push_sessions(&self, new: &[SessionStats]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut sessions: Vec<SessionStats> = self.read_log(SESSIONS_FILE).await?;
        sessions.extend_from_slice(new);
        keep_newest(&mut sessions, SESSION_LIMIT);
        self.write(SESSIONS_FILE, &sessions).await?;
        debug!(added = new.len(), stored = sessions.len(), "sessions written");
        Ok(())
    }
}

fn io(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

/// Drop the oldest entries so at most `limit` remain. Entries are in append
/// order, so the oldest sit at the front.
fn keep_newest<T>(items: &mut Vec<T>, limit: usize) {
    if items.len() > limit {
        let excess = items.len() - limit;
        items.drain(..excess);
    }
}

#[async_trait]
impl AttemptStore for LocalFileStore {
    async fn append_result(&self, result: &ProblemResult) -> Result<(), StorageError> {
        self.push_results(std::slice::from_ref(result)).await
    }

    async fn append_results(&self, results: &[ProblemResult]) -> Result<(), StorageError> {
        self.push_results(results).await
    }

    async fn append_session(&self, session: &SessionStats) -> Result<(), StorageError> {
        self.push_sessions(std::slice::from_ref(session)).await
    }

    async fn append_sessions(&self, sessions: &[SessionStats]) -> Result<(), StorageError> {
        self.push_sessions(sessions).await
    }

    async fn list_results(&self) -> Result<Vec<ProblemResult>, StorageError> {
        Ok(self.list_log(RESULTS_FILE).await)
    }

    async fn list_sessions(&self) -> Result<Vec<SessionStats>, StorageError> {
        Ok(self.list_log(SESSIONS_FILE).await)
    }

    async fn streak_state(&self) -> Result<StreakState, StorageError> {
        Ok(self.read_streak().await)
    }

    async fn save_streak_state(&self, state: &StreakState) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.write(STREAK_FILE, state).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        self.remove(RESULTS_FILE).await?;
        self.remove(SESSIONS_FILE).await?;
        self.remove(STREAK_FILE).await?;
        debug!(dir = %self.dir.display(), "local attempt files cleared");
        Ok(())
    }
}
