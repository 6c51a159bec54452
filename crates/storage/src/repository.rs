use async_trait::async_trait;
use pilot_core::model::{ProblemResult, SessionStats};
use pilot_core::streak::StreakState;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Newest sessions a capped backend keeps (file store) or returns (database).
pub const SESSION_LIMIT: usize = 100;

/// Newest results a capped backend keeps (file store) or returns (database).
pub const RESULT_LIMIT: usize = 1000;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("i/o error: {0}")]
    Io(String),
}

/// Append-only log of answered problems and finished sessions, plus the
/// learner's streak.
///
/// Listing order is backend specific; consumers sort what they read.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Append one answered problem.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &ProblemResult) -> Result<(), StorageError>;

    /// Append a batch of results in one write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the batch cannot be stored.
    async fn append_results(&self, results: &[ProblemResult]) -> Result<(), StorageError>;

    /// Append one session summary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn append_session(&self, session: &SessionStats) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the batch cannot be stored.
    async fn append_sessions(&self, sessions: &[SessionStats]) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be read.
    async fn list_results(&self) -> Result<Vec<ProblemResult>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be read.
    async fn list_sessions(&self) -> Result<Vec<SessionStats>, StorageError>;

    /// Current streak, or the default state if none was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the streak cannot be read.
    async fn streak_state(&self) -> Result<StreakState, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the streak cannot be written.
    async fn save_streak_state(&self, state: &StreakState) -> Result<(), StorageError>;

    /// Remove every result, session, and the streak.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be cleared.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Keeps everything it is given; no caps apply.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<Vec<ProblemResult>>>,
    sessions: Arc<Mutex<Vec<SessionStats>>>,
    streak: Arc<Mutex<StreakState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl AttemptStore for InMemoryRepository {
    async fn append_result(&self, result: &ProblemResult) -> Result<(), StorageError> {
        let mut guard = self.results.lock().map_err(poisoned)?;
        guard.push(result.clone());
        Ok(())
    }

    async fn append_results(&self, results: &[ProblemResult]) -> Result<(), StorageError> {
        let mut guard = self.results.lock().map_err(poisoned)?;
        guard.extend_from_slice(results);
        Ok(())
    }

    async fn append_session(&self, session: &SessionStats) -> Result<(), StorageError> {
        let mut guard = self.sessions.lock().map_err(poisoned)?;
        guard.push(session.clone());
        Ok(())
    }

    async fn append_sessions(&self, sessions: &[SessionStats]) -> Result<(), StorageError> {
        let mut guard = self.sessions.lock().map_err(poisoned)?;
        guard.extend_from_slice(sessions);
        Ok(())
    }

    async fn list_results(&self) -> Result<Vec<ProblemResult>, StorageError> {
        let guard = self.results.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn list_sessions(&self) -> Result<Vec<SessionStats>, StorageError> {
        let guard = self.sessions.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn streak_state(&self) -> Result<StreakState, StorageError> {
        let guard = self.streak.lock().map_err(poisoned)?;
        Ok(*guard)
    }

    async fn save_streak_state(&self, state: &StreakState) -> Result<(), StorageError> {
        let mut guard = self.streak.lock().map_err(poisoned)?;
        *guard = *state;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.results.lock().map_err(poisoned)?.clear();
        self.sessions.lock().map_err(poisoned)?.clear();
        *self.streak.lock().map_err(poisoned)? = StreakState::default();
        Ok(())
    }
}

/// Attempt stores for one run of the app.
///
/// `attempts` is the store every read and write goes to first. When set,
/// `fallback` takes writes that `attempts` rejected.
#[derive(Clone)]
pub struct Storage {
    pub attempts: Arc<dyn AttemptStore>,
    pub fallback: Option<Arc<dyn AttemptStore>>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo: Arc<dyn AttemptStore> = Arc::new(InMemoryRepository::new());
        Self {
            attempts: repo,
            fallback: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn AttemptStore>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}
