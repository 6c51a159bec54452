use pilot_core::model::{ProblemResult, SessionStats};
use pilot_core::streak::StreakState;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use super::SqliteRepository;
use super::mapping::{breakdown_to_json, conn, map_result_row, map_session_row, map_streak_row};
use crate::repository::{AttemptStore, RESULT_LIMIT, SESSION_LIMIT, StorageError};

fn limit_i64(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

// Rows are keyed by id; re-sending an already stored entry is a no-op, which
// keeps a retried bulk transfer from duplicating history.

async fn insert_result(
    tx: &mut Transaction<'_, Sqlite>,
    result: &ProblemResult,
) -> Result<(), StorageError> {
    sqlx::query(
        r"
            INSERT INTO problem_results (
                problem_id, category, user_answer, correct_answer,
                is_correct, time_spent, answered_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(problem_id) DO NOTHING
        ",
    )
    .bind(result.problem_id.as_uuid())
    .bind(result.category.slug())
    .bind(result.user_answer)
    .bind(result.correct_answer)
    .bind(i64::from(result.is_correct))
    .bind(i64::from(result.time_spent))
    .bind(result.timestamp)
    .execute(&mut **tx)
    .await
    .map_err(conn)?;
    Ok(())
}

async fn insert_session(
    tx: &mut Transaction<'_, Sqlite>,
    session: &SessionStats,
) -> Result<(), StorageError> {
    let breakdown = breakdown_to_json(session.category_breakdown())?;
    sqlx::query(
        r"
            INSERT INTO practice_sessions (
                id, started_at, duration, problems_attempted, problems_correct,
                accuracy, average_time, category_breakdown
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO NOTHING
        ",
    )
    .bind(session.id().as_uuid())
    .bind(session.date())
    .bind(i64::from(session.duration()))
    .bind(i64::from(session.problems_attempted()))
    .bind(i64::from(session.problems_correct()))
    .bind(i64::from(session.accuracy()))
    .bind(i64::from(session.average_time()))
    .bind(breakdown)
    .execute(&mut **tx)
    .await
    .map_err(conn)?;
    Ok(())
}

#[async_trait::async_trait]
impl AttemptStore for SqliteRepository {
    async fn append_result(&self, result: &ProblemResult) -> Result<(), StorageError> {
        self.append_results(std::slice::from_ref(result)).await
    }

    async fn append_results(&self, results: &[ProblemResult]) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for result in results {
            insert_result(&mut tx, result).await?;
        }
        tx.commit().await.map_err(conn)?;
        debug!(count = results.len(), "results inserted");
        Ok(())
    }

    async fn append_session(&self, session: &SessionStats) -> Result<(), StorageError> {
        self.append_sessions(std::slice::from_ref(session)).await
    }

    async fn append_sessions(&self, sessions: &[SessionStats]) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for session in sessions {
            insert_session(&mut tx, session).await?;
        }
        tx.commit().await.map_err(conn)?;
        debug!(count = sessions.len(), "sessions inserted");
        Ok(())
    }

    /// Newest first, at most [`RESULT_LIMIT`] rows.
    async fn list_results(&self) -> Result<Vec<ProblemResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    problem_id, category, user_answer, correct_answer,
                    is_correct, time_spent, answered_at
                FROM problem_results
                ORDER BY answered_at DESC, rowid DESC
                LIMIT ?1
            ",
        )
        .bind(limit_i64(RESULT_LIMIT))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_result_row).collect()
    }

    /// Newest first, at most [`SESSION_LIMIT`] rows.
    async fn list_sessions(&self) -> Result<Vec<SessionStats>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, started_at, duration, problems_attempted, problems_correct,
                    accuracy, average_time, category_breakdown
                FROM practice_sessions
                ORDER BY started_at DESC, rowid DESC
                LIMIT ?1
            ",
        )
        .bind(limit_i64(SESSION_LIMIT))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_session_row).collect()
    }

    async fn streak_state(&self) -> Result<StreakState, StorageError> {
        let row = sqlx::query(
            r"
                SELECT current_streak, longest_streak, last_practice_date
                FROM streaks
                WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => map_streak_row(&row),
            None => Ok(StreakState::default()),
        }
    }

    async fn save_streak_state(&self, state: &StreakState) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO streaks (id, current_streak, longest_streak, last_practice_date)
                VALUES (1, ?1, ?2, ?3)
                ON CONFLICT(id) DO UPDATE SET
                    current_streak = excluded.current_streak,
                    longest_streak = excluded.longest_streak,
                    last_practice_date = excluded.last_practice_date
            ",
        )
        .bind(i64::from(state.current_streak))
        .bind(i64::from(state.longest_streak))
        .bind(state.last_practice_date)
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for statement in [
            "DELETE FROM problem_results",
            "DELETE FROM practice_sessions",
            "DELETE FROM streaks",
        ] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        debug!("database attempt log cleared");
        Ok(())
    }
}
