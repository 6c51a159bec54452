//! Daily practice streak.
//!
//! Every backend stores a [`StreakState`] and moves it forward with the same
//! pure [`advance`] transition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    pub last_practice_date: Option<NaiveDate>,
}

impl StreakState {
    /// Streak as it should be displayed on `today`: a run whose last day is
    /// more than one day back is already broken.
    #[must_use]
    pub fn current_on(&self, today: NaiveDate) -> u32 {
        match self.last_practice_date {
            Some(last) if (today - last).num_days() <= 1 => self.current_streak,
            _ => 0,
        }
    }
}

/// Record a practice on `today`.
///
/// - first practice ever starts the streak at 1
/// - practicing again the same day changes nothing
/// - practicing the day after the last practice extends the streak
/// - a gap of more than one day resets it to 1
///
/// A `today` earlier than the recorded date (clock moved backwards) keeps both
/// the count and the recorded date; otherwise the last practice date becomes
/// `today`.
#[must_use]
pub fn advance(state: StreakState, today: NaiveDate) -> StreakState {
    let current = match state.last_practice_date {
        None => 1,
        Some(last) => match (today - last).num_days() {
            1 => state.current_streak.saturating_add(1),
            gap if gap > 1 => 1,
            _ => state.current_streak.max(1),
        },
    };

    let last = state.last_practice_date.map_or(today, |last| last.max(today));
    StreakState {
        current_streak: current,
        longest_streak: state.longest_streak.max(current),
        last_practice_date: Some(last),
    }
}
