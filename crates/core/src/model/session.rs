use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::{Category, ProblemResult, SessionId};
use crate::numeric::{percent, rounded_mean};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStatsError {
    #[error("session has no answered problems")]
    Empty,

    #[error("correct answers ({correct}) exceed attempted problems ({attempted})")]
    CorrectExceedsAttempted { attempted: u32, correct: u32 },

    #[error("too many results for a single session: {len}")]
    TooManyResults { len: usize },

    #[error("accuracy {accuracy} does not match {correct}/{attempted}")]
    AccuracyMismatch {
        accuracy: u32,
        attempted: u32,
        correct: u32,
    },
}

/// Attempted/correct counts for one category within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub attempted: u32,
    pub correct: u32,
}

/// Rollup of one timed practice session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedSessionStats")]
pub struct SessionStats {
    id: SessionId,
    date: DateTime<Utc>,
    duration: u32,
    problems_attempted: u32,
    problems_correct: u32,
    accuracy: u32,
    average_time: u32,
    category_breakdown: BTreeMap<Category, CategoryTally>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSessionStats {
    id: SessionId,
    date: DateTime<Utc>,
    duration: u32,
    problems_attempted: u32,
    problems_correct: u32,
    accuracy: u32,
    average_time: u32,
    #[serde(default)]
    category_breakdown: BTreeMap<Category, CategoryTally>,
}

impl TryFrom<PersistedSessionStats> for SessionStats {
    type Error = SessionStatsError;

    fn try_from(raw: PersistedSessionStats) -> Result<Self, Self::Error> {
        Self::from_persisted(
            raw.id,
            raw.date,
            raw.duration,
            raw.problems_attempted,
            raw.problems_correct,
            raw.accuracy,
            raw.average_time,
            raw.category_breakdown,
        )
    }
}

impl SessionStats {
    /// Build the summary for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStatsError::Empty` when no problems were answered; such
    /// sessions are never stored.
    /// Returns `SessionStatsError::TooManyResults` if the count cannot fit in `u32`.
    pub fn from_results(
        id: SessionId,
        date: DateTime<Utc>,
        duration: u32,
        results: &[ProblemResult],
    ) -> Result<Self, SessionStatsError> {
        if results.is_empty() {
            return Err(SessionStatsError::Empty);
        }
        let attempted = u32::try_from(results.len())
            .map_err(|_| SessionStatsError::TooManyResults { len: results.len() })?;

        let mut correct = 0_u32;
        let mut total_time = 0_u64;
        let mut breakdown: BTreeMap<Category, CategoryTally> = BTreeMap::new();
        for result in results {
            let tally = breakdown.entry(result.category).or_default();
            tally.attempted = tally.attempted.saturating_add(1);
            if result.is_correct {
                correct = correct.saturating_add(1);
                tally.correct = tally.correct.saturating_add(1);
            }
            total_time += u64::from(result.time_spent);
        }

        Ok(Self {
            id,
            date,
            duration,
            problems_attempted: attempted,
            problems_correct: correct,
            accuracy: percent(u64::from(correct), u64::from(attempted)),
            average_time: rounded_mean(total_time, u64::from(attempted)),
            category_breakdown: breakdown,
        })
    }

    /// Rehydrate a session from storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionStatsError` if the counts are inconsistent.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: SessionId,
        date: DateTime<Utc>,
        duration: u32,
        problems_attempted: u32,
        problems_correct: u32,
        accuracy: u32,
        average_time: u32,
        category_breakdown: BTreeMap<Category, CategoryTally>,
    ) -> Result<Self, SessionStatsError> {
        if problems_attempted == 0 {
            return Err(SessionStatsError::Empty);
        }
        if problems_correct > problems_attempted {
            return Err(SessionStatsError::CorrectExceedsAttempted {
                attempted: problems_attempted,
                correct: problems_correct,
            });
        }
        let expected = percent(u64::from(problems_correct), u64::from(problems_attempted));
        if expected != accuracy {
            return Err(SessionStatsError::AccuracyMismatch {
                accuracy,
                attempted: problems_attempted,
                correct: problems_correct,
            });
        }

        Ok(Self {
            id,
            date,
            duration,
            problems_attempted,
            problems_correct,
            accuracy,
            average_time,
            category_breakdown,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Elapsed session time in seconds.
    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub fn problems_attempted(&self) -> u32 {
        self.problems_attempted
    }

    #[must_use]
    pub fn problems_correct(&self) -> u32 {
        self.problems_correct
    }

    #[must_use]
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    #[must_use]
    pub fn average_time(&self) -> u32 {
        self.average_time
    }

    #[must_use]
    pub fn category_breakdown(&self) -> &BTreeMap<Category, CategoryTally> {
        &self.category_breakdown
    }
}
