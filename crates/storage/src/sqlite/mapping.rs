use std::collections::BTreeMap;

use pilot_core::model::{
    Category, CategoryTally, ProblemId, ProblemResult, SessionId, SessionStats,
};
use pilot_core::streak::StreakState;
use sqlx::Row;
use uuid::Uuid;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn u32_column(row: &sqlx::sqlite::SqliteRow, field: &'static str) -> Result<u32, StorageError> {
    u32_from_i64(field, row.try_get::<i64, _>(field).map_err(ser)?)
}

pub(crate) fn parse_category(s: &str) -> Result<Category, StorageError> {
    s.parse::<Category>().map_err(ser)
}

pub(crate) fn breakdown_to_json(
    breakdown: &BTreeMap<Category, CategoryTally>,
) -> Result<String, StorageError> {
    serde_json::to_string(breakdown).map_err(ser)
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProblemResult, StorageError> {
    let category: String = row.try_get("category").map_err(ser)?;
    let is_correct: i64 = row.try_get("is_correct").map_err(ser)?;

    Ok(ProblemResult {
        problem_id: ProblemId::from_uuid(row.try_get::<Uuid, _>("problem_id").map_err(ser)?),
        category: parse_category(&category)?,
        user_answer: row.try_get("user_answer").map_err(ser)?,
        correct_answer: row.try_get("correct_answer").map_err(ser)?,
        is_correct: is_correct != 0,
        time_spent: u32_column(row, "time_spent")?,
        timestamp: row.try_get("answered_at").map_err(ser)?,
    })
}

pub(crate) fn map_session_row(row: &sqlx::sqlite::SqliteRow) -> Result<SessionStats, StorageError> {
    let breakdown_json: String = row.try_get("category_breakdown").map_err(ser)?;
    let breakdown: BTreeMap<Category, CategoryTally> =
        serde_json::from_str(&breakdown_json).map_err(ser)?;

    SessionStats::from_persisted(
        SessionId::from_uuid(row.try_get::<Uuid, _>("id").map_err(ser)?),
        row.try_get("started_at").map_err(ser)?,
        u32_column(row, "duration")?,
        u32_column(row, "problems_attempted")?,
        u32_column(row, "problems_correct")?,
        u32_column(row, "accuracy")?,
        u32_column(row, "average_time")?,
        breakdown,
    )
    .map_err(ser)
}

pub(crate) fn map_streak_row(row: &sqlx::sqlite::SqliteRow) -> Result<StreakState, StorageError> {
    Ok(StreakState {
        current_streak: u32_column(row, "current_streak")?,
        longest_streak: u32_column(row, "longest_streak")?,
        last_practice_date: row.try_get("last_practice_date").map_err(ser)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_rejected() {
        assert!(matches!(
            u32_from_i64("duration", -1),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(u32_from_i64("duration", 42).unwrap(), 42);
    }

    #[test]
    fn unknown_category_is_a_serialization_error() {
        assert!(parse_category("warp-speed").is_err());
        assert_eq!(parse_category("slant-range").unwrap(), Category::SlantRange);
    }

    #[test]
    fn breakdown_uses_category_slugs_as_keys() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(
            Category::FuelDumping,
            CategoryTally {
                attempted: 3,
                correct: 2,
            },
        );
        let json = breakdown_to_json(&breakdown).unwrap();
        assert_eq!(json, r#"{"fuel-dumping":{"attempted":3,"correct":2}}"#);
    }
}
