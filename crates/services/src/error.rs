//! Shared error types for the services crate.

use thiserror::Error;

use pilot_core::model::SessionStatsError;
use storage::repository::StorageError;

/// Errors emitted by practice sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session length must be 5 to 30 minutes in steps of 5, got {minutes}")]
    InvalidLength { minutes: u32 },
    #[error("session already ended")]
    Ended,
    #[error("no problem is waiting for an answer")]
    NoProblem,
    #[error(transparent)]
    Summary(#[from] SessionStatsError),
}

/// Errors emitted while reading progress or updating the streak.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the local to database transfer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransferError {
    #[error("reading local attempts failed: {0}")]
    ReadLocal(#[source] StorageError),
    #[error("writing to the database failed after {moved_results} results: {source}")]
    WriteRemote {
        moved_results: usize,
        #[source]
        source: StorageError,
    },
    #[error("clearing local attempts failed: {0}")]
    ClearLocal(#[source] StorageError),
}
