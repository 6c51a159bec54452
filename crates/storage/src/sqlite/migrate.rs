use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Applies pending schema versions in order.
///
/// Version 1 creates the attempt log: problem results, practice sessions, the
/// single-row streak table, and the indexes used for newest-first listing.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS problem_results (
                    problem_id BLOB PRIMARY KEY,
                    category TEXT NOT NULL,
                    user_answer REAL,
                    correct_answer REAL NOT NULL,
                    is_correct INTEGER NOT NULL CHECK (is_correct IN (0, 1)),
                    time_spent INTEGER NOT NULL CHECK (time_spent >= 0),
                    answered_at INTEGER NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS practice_sessions (
                    id BLOB PRIMARY KEY,
                    started_at TEXT NOT NULL,
                    duration INTEGER NOT NULL CHECK (duration >= 0),
                    problems_attempted INTEGER NOT NULL CHECK (problems_attempted > 0),
                    problems_correct INTEGER NOT NULL CHECK (problems_correct >= 0),
                    accuracy INTEGER NOT NULL CHECK (accuracy BETWEEN 0 AND 100),
                    average_time INTEGER NOT NULL CHECK (average_time >= 0),
                    category_breakdown TEXT NOT NULL,
                    CHECK (problems_correct <= problems_attempted)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS streaks (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    current_streak INTEGER NOT NULL CHECK (current_streak >= 0),
                    longest_streak INTEGER NOT NULL CHECK (longest_streak >= 0),
                    last_practice_date TEXT
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_problem_results_answered_at
                    ON problem_results (answered_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_practice_sessions_started_at
                    ON practice_sessions (started_at);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
