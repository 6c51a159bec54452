//! One-time move of the device-local attempt log into the database.

use pilot_core::streak::StreakState;
use storage::repository::AttemptStore;
use tracing::{info, warn};

use crate::error::TransferError;

/// Results are written in chunks of this many rows.
pub const RESULT_BATCH_SIZE: usize = 100;

/// What a transfer moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferReport {
    pub sessions: usize,
    pub results: usize,
    /// The local streak was copied because the remote store had none.
    pub streak: bool,
}

impl TransferReport {
    #[must_use]
    pub fn moved_anything(&self) -> bool {
        self.sessions > 0 || self.results > 0
    }
}

pub struct TransferService;

impl TransferService {
    /// Copy every local session and result into `remote`, then clear `local`.
    ///
    /// Nothing is written when the local log is empty. Any failed write stops
    /// the transfer before `local` is cleared, so it can be retried; rows
    /// already copied are keyed by id and are not duplicated by the retry.
    ///
    /// # Errors
    ///
    /// Returns `TransferError` naming the step that failed.
    pub async fn transfer(
        local: &dyn AttemptStore,
        remote: &dyn AttemptStore,
    ) -> Result<TransferReport, TransferError> {
        let sessions = local.list_sessions().await.map_err(TransferError::ReadLocal)?;
        let results = local.list_results().await.map_err(TransferError::ReadLocal)?;
        let mut report = TransferReport::default();

        if sessions.is_empty() && results.is_empty() {
            info!("no local attempts to transfer");
            return Ok(report);
        }

        if !sessions.is_empty() {
            remote
                .append_sessions(&sessions)
                .await
                .map_err(|source| TransferError::WriteRemote {
                    moved_results: 0,
                    source,
                })?;
            report.sessions = sessions.len();
        }

        for batch in results.chunks(RESULT_BATCH_SIZE) {
            if let Err(source) = remote.append_results(batch).await {
                warn!(moved = report.results, error = %source, "result batch failed, keeping local copy");
                return Err(TransferError::WriteRemote {
                    moved_results: report.results,
                    source,
                });
            }
            report.results += batch.len();
        }

        let local_streak = local.streak_state().await.map_err(TransferError::ReadLocal)?;
        let remote_streak = remote.streak_state().await.map_err(|source| {
            TransferError::WriteRemote {
                moved_results: report.results,
                source,
            }
        })?;
        if remote_streak == StreakState::default() && local_streak != StreakState::default() {
            remote
                .save_streak_state(&local_streak)
                .await
                .map_err(|source| TransferError::WriteRemote {
                    moved_results: report.results,
                    source,
                })?;
            report.streak = true;
        }

        if report.moved_anything() {
            local.clear().await.map_err(TransferError::ClearLocal)?;
        }
        info!(
            sessions = report.sessions,
            results = report.results,
            streak = report.streak,
            "local attempts transferred"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use pilot_core::model::{Category, Problem, ProblemDraft, ProblemId, ProblemResult, SessionId, SessionStats};
    use pilot_core::time::fixed_now;
    use std::sync::Mutex;
    use storage::repository::{InMemoryRepository, StorageError};

    fn result(timestamp: i64) -> ProblemResult {
        let problem = Problem::from_draft(
            ProblemId::generate(),
            Category::VisibilityRvr,
            ProblemDraft::new("Q", 2400.0, 0.0, "feet"),
        );
        ProblemResult::new(&problem, Some(2400.0), true, 2, timestamp)
    }

    /// Records the size of every result batch it receives.
    #[derive(Default)]
    struct BatchRecorder {
        inner: InMemoryRepository,
        batches: Mutex<Vec<usize>>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl AttemptStore for BatchRecorder {
        async fn append_result(&self, r: &ProblemResult) -> Result<(), StorageError> {
            self.inner.append_result(r).await
        }
        async fn append_results(&self, rs: &[ProblemResult]) -> Result<(), StorageError> {
            {
                let mut batches = self.batches.lock().unwrap();
                if self.fail_after.is_some_and(|n| batches.len() >= n) {
                    return Err(StorageError::Connection("timeout".into()));
                }
                batches.push(rs.len());
            }
            self.inner.append_results(rs).await
        }
        async fn append_session(&self, s: &SessionStats) -> Result<(), StorageError> {
            self.inner.append_session(s).await
        }
        async fn append_sessions(&self, ss: &[SessionStats]) -> Result<(), StorageError> {
            self.inner.append_sessions(ss).await
        }
        async fn list_results(&self) -> Result<Vec<ProblemResult>, StorageError> {
            self.inner.list_results().await
        }
        async fn list_sessions(&self) -> Result<Vec<SessionStats>, StorageError> {
            self.inner.list_sessions().await
        }
        async fn streak_state(&self) -> Result<StreakState, StorageError> {
            self.inner.streak_state().await
        }
        async fn save_streak_state(&self, s: &StreakState) -> Result<(), StorageError> {
            self.inner.save_streak_state(s).await
        }
        async fn clear(&self) -> Result<(), StorageError> {
            self.inner.clear().await
        }
    }

    #[tokio::test]
    async fn empty_local_log_moves_nothing() {
        let local = InMemoryRepository::new();
        let remote = InMemoryRepository::new();
        let report = TransferService::transfer(&local, &remote).await.unwrap();
        assert_eq!(report, TransferReport::default());
    }

    #[tokio::test]
    async fn results_move_in_batches_of_one_hundred() {
        let local = InMemoryRepository::new();
        let results: Vec<ProblemResult> = (0..250).map(result).collect();
        local.append_results(&results).await.unwrap();
        let session =
            SessionStats::from_results(SessionId::generate(), fixed_now(), 60, &results).unwrap();
        local.append_session(&session).await.unwrap();
        let streak = StreakState {
            current_streak: 3,
            longest_streak: 3,
            last_practice_date: NaiveDate::from_ymd_opt(2023, 11, 14),
        };
        local.save_streak_state(&streak).await.unwrap();
        let remote = BatchRecorder::default();

        let report = TransferService::transfer(&local, &remote).await.unwrap();

        assert_eq!(report.results, 250);
        assert_eq!(report.sessions, 1);
        assert!(report.streak);
        assert_eq!(*remote.batches.lock().unwrap(), vec![100, 100, 50]);
        assert_eq!(remote.streak_state().await.unwrap(), streak);
        assert!(local.list_results().await.unwrap().is_empty());
        assert!(local.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_batch_keeps_local_copy() {
        let local = InMemoryRepository::new();
        let results: Vec<ProblemResult> = (0..150).map(result).collect();
        local.append_results(&results).await.unwrap();
        let remote = BatchRecorder {
            fail_after: Some(1),
            ..BatchRecorder::default()
        };

        let err = TransferService::transfer(&local, &remote).await.unwrap_err();

        assert!(matches!(
            err,
            TransferError::WriteRemote {
                moved_results: 100,
                ..
            }
        ));
        assert_eq!(local.list_results().await.unwrap().len(), 150);
    }

    #[tokio::test]
    async fn existing_remote_streak_is_kept() {
        let local = InMemoryRepository::new();
        local.append_result(&result(1)).await.unwrap();
        local
            .save_streak_state(&StreakState {
                current_streak: 1,
                longest_streak: 1,
                last_practice_date: NaiveDate::from_ymd_opt(2023, 11, 1),
            })
            .await
            .unwrap();
        let remote = InMemoryRepository::new();
        let remote_streak = StreakState {
            current_streak: 9,
            longest_streak: 12,
            last_practice_date: NaiveDate::from_ymd_opt(2023, 11, 14),
        };
        remote.save_streak_state(&remote_streak).await.unwrap();

        let report = TransferService::transfer(&local, &remote).await.unwrap();

        assert!(!report.streak);
        assert_eq!(remote.streak_state().await.unwrap(), remote_streak);
    }
}
