use pilot_core::Clock;
use pilot_core::model::SessionStats;
use pilot_core::stats::{
    CalendarDay, CategoryStats, DEFAULT_MIN_ATTEMPTS, DEFAULT_WEAK_LIMIT, MissRate, OverallStats,
    TimingStats, WeakCategory, category_stats, daily_history, overall_stats, practice_calendar,
    ranked_miss_rates, recent_sessions, timing_stats, total_days_practiced, weak_categories,
};
use pilot_core::streak::StreakState;
use storage::repository::Storage;
use tracing::debug;

use crate::error::ProgressError;
use crate::streak_service::StreakService;

/// Sessions shown in the dashboard's recent list.
pub const RECENT_SESSION_COUNT: usize = 5;

/// Calendar span used when none is requested.
pub const DEFAULT_CALENDAR_DAYS: u32 = 365;

/// Everything the stats dashboard shows, computed from one snapshot of the
/// attempt log.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub overall: OverallStats,
    pub categories: Vec<CategoryStats>,
    /// Most practiced categories first.
    pub timing: Vec<TimingStats>,
    pub weak: Vec<WeakCategory>,
    pub miss_rates: Vec<MissRate>,
    pub streak: StreakState,
    pub days_practiced: usize,
    /// Oldest first.
    pub recent_sessions: Vec<SessionStats>,
    /// Most recent day first, zero-filled.
    pub calendar: Vec<CalendarDay>,
}

impl Dashboard {
    /// Days in the calendar window with at least one session.
    #[must_use]
    pub fn active_days(&self) -> usize {
        self.calendar
            .iter()
            .filter(|d| d.sessions_count > 0)
            .count()
    }
}

#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    storage: Storage,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        Self { clock, storage }
    }

    /// Build the dashboard with a calendar covering `days_back` days.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the attempt log cannot be read.
    pub async fn dashboard(&self, days_back: u32) -> Result<Dashboard, ProgressError> {
        let store = self.storage.attempts.as_ref();
        let results = store.list_results().await?;
        let sessions = store.list_sessions().await?;
        let streak = StreakService::new(self.clock, self.storage.clone())
            .current()
            .await?;
        debug!(
            results = results.len(),
            sessions = sessions.len(),
            "dashboard snapshot loaded"
        );

        let mut timing = timing_stats(&results);
        timing.sort_by(|a, b| b.total_attempts.cmp(&a.total_attempts));

        Ok(Dashboard {
            overall: overall_stats(&results),
            categories: category_stats(&results),
            timing,
            weak: weak_categories(&results, DEFAULT_MIN_ATTEMPTS, DEFAULT_WEAK_LIMIT),
            miss_rates: ranked_miss_rates(&results),
            streak,
            days_practiced: total_days_practiced(&sessions),
            recent_sessions: recent_sessions(&sessions, RECENT_SESSION_COUNT),
            calendar: practice_calendar(&sessions, days_back, self.clock.today()),
        })
    }

    /// Per-day totals for every day with a session, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the session log cannot be read.
    pub async fn history(&self) -> Result<Vec<CalendarDay>, ProgressError> {
        let sessions = self.storage.attempts.list_sessions().await?;
        Ok(daily_history(&sessions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pilot_core::model::{Category, Problem, ProblemDraft, ProblemId, ProblemResult, SessionId};
    use pilot_core::time::fixed_now;

    fn result(category: Category, is_correct: bool, timestamp: i64) -> ProblemResult {
        let problem = Problem::from_draft(
            ProblemId::generate(),
            category,
            ProblemDraft::new("Q", 1.0, 0.0, "x"),
        );
        ProblemResult::new(&problem, Some(1.0), is_correct, 3, timestamp)
    }

    #[tokio::test]
    async fn empty_log_gives_zeroed_dashboard() {
        let svc = ProgressService::new(Clock::fixed(fixed_now()), Storage::in_memory());
        let dashboard = svc.dashboard(DEFAULT_CALENDAR_DAYS).await.unwrap();

        assert_eq!(dashboard.overall, OverallStats::default());
        assert!(dashboard.categories.is_empty());
        assert_eq!(dashboard.calendar.len(), 365);
        assert_eq!(dashboard.calendar[0].date, fixed_now().date_naive());
        assert_eq!(dashboard.active_days(), 0);
        assert_eq!(dashboard.streak.current_streak, 0);
    }

    #[tokio::test]
    async fn dashboard_reflects_stored_history() {
        let storage = Storage::in_memory();
        let mut results = Vec::new();
        for i in 0..6 {
            results.push(result(Category::DriftAngle, i < 2, i));
        }
        results.push(result(Category::Crosswind, true, 10));
        storage.attempts.append_results(&results).await.unwrap();

        let yesterday = fixed_now() - Duration::days(1);
        for (date, slice) in [(yesterday, &results[..3]), (fixed_now(), &results[3..])] {
            let session =
                SessionStats::from_results(SessionId::generate(), date, 600, slice).unwrap();
            storage.attempts.append_session(&session).await.unwrap();
        }

        let svc = ProgressService::new(Clock::fixed(fixed_now()), storage);
        let dashboard = svc.dashboard(7).await.unwrap();

        assert_eq!(dashboard.overall.total_problems, 7);
        assert_eq!(dashboard.timing[0].category, Category::DriftAngle);
        assert_eq!(dashboard.weak.len(), 1);
        assert_eq!(dashboard.weak[0].accuracy, 33);
        assert_eq!(dashboard.miss_rates[0].missed, 4);
        assert_eq!(dashboard.days_practiced, 2);
        assert_eq!(dashboard.recent_sessions.len(), 2);
        assert_eq!(dashboard.calendar.len(), 7);
        assert_eq!(dashboard.active_days(), 2);

        let history = svc.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].date < history[1].date);
    }
}
