//! Writes that fall back to a second store when the primary one fails.

use pilot_core::model::{ProblemResult, SessionStats};
use pilot_core::streak::StreakState;
use storage::repository::{AttemptStore, Storage, StorageError};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Write<'a> {
    Result(&'a ProblemResult),
    Session(&'a SessionStats),
    Streak(&'a StreakState),
}

impl Write<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Write::Result(_) => "result",
            Write::Session(_) => "session",
            Write::Streak(_) => "streak",
        }
    }

    async fn apply(&self, store: &dyn AttemptStore) -> Result<(), StorageError> {
        match self {
            Write::Result(result) => store.append_result(result).await,
            Write::Session(session) => store.append_session(session).await,
            Write::Streak(state) => store.save_streak_state(state).await,
        }
    }
}

/// Apply `write` to the primary store, retrying once against the fallback
/// store if there is one.
///
/// Returns the fallback's error when both fail, or the primary's when there
/// is no fallback.
pub(crate) async fn persist(storage: &Storage, write: Write<'_>) -> Result<(), StorageError> {
    let primary_err = match write.apply(storage.attempts.as_ref()).await {
        Ok(()) => {
            debug!(kind = write.kind(), "write stored");
            return Ok(());
        }
        Err(e) => e,
    };

    let Some(fallback) = &storage.fallback else {
        return Err(primary_err);
    };
    warn!(
        kind = write.kind(),
        error = %primary_err,
        "primary store rejected write, using fallback"
    );
    write.apply(fallback.as_ref()).await
}
