//! Statistics Engine: pure rollups over snapshots of the attempt log.
//!
//! Inputs are normalized before aggregation (results by `timestamp`, sessions
//! by `date`, both stable) so the order a store returns rows in never changes
//! the output. Per-category rows come out in order of first appearance in the
//! normalized log.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{Category, ProblemResult, SessionStats};
use crate::numeric::{percent, rounded_mean};

/// Categories need this many attempts before they count as weak.
pub const DEFAULT_MIN_ATTEMPTS: u32 = 5;
/// Number of weak categories surfaced on the dashboard.
pub const DEFAULT_WEAK_LIMIT: usize = 5;
/// Miss rates are only ranked once a category has this many attempts.
pub const MISS_RATE_MIN_ATTEMPTS: u32 = 5;

//
// ─── RESULT STATS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_problems: u32,
    pub total_correct: u32,
    pub accuracy: u32,
    pub avg_time: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: Category,
    pub attempted: u32,
    pub correct: u32,
    pub avg_time: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingStats {
    pub category: Category,
    pub avg_time: u32,
    pub fastest: u32,
    pub slowest: u32,
    pub total_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakCategory {
    pub category: Category,
    pub attempted: u32,
    pub accuracy: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissRate {
    pub category: Category,
    pub missed: u32,
    pub total: u32,
    /// Whole-number percentage of attempts answered incorrectly.
    pub rate: u32,
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    attempted: u32,
    correct: u32,
    total_time: u64,
    fastest: u32,
    slowest: u32,
}

impl Tally {
    fn new() -> Self {
        Self {
            attempted: 0,
            correct: 0,
            total_time: 0,
            fastest: u32::MAX,
            slowest: 0,
        }
    }

    fn record(&mut self, result: &ProblemResult) {
        self.attempted = self.attempted.saturating_add(1);
        if result.is_correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.total_time += u64::from(result.time_spent);
        self.fastest = self.fastest.min(result.time_spent);
        self.slowest = self.slowest.max(result.time_spent);
    }

    fn avg_time(&self) -> u32 {
        rounded_mean(self.total_time, u64::from(self.attempted))
    }
}

fn by_timestamp(results: &[ProblemResult]) -> Vec<&ProblemResult> {
    let mut sorted: Vec<&ProblemResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);
    sorted
}

/// Per-category tallies in order of first appearance.
fn tally_by_category(results: &[ProblemResult]) -> Vec<(Category, Tally)> {
    let mut order: Vec<(Category, Tally)> = Vec::new();
    let mut index: HashMap<Category, usize> = HashMap::new();
    for result in by_timestamp(results) {
        let slot = *index.entry(result.category).or_insert_with(|| {
            order.push((result.category, Tally::new()));
            order.len() - 1
        });
        order[slot].1.record(result);
    }
    order
}

#[must_use]
pub fn overall_stats(results: &[ProblemResult]) -> OverallStats {
    if results.is_empty() {
        return OverallStats::default();
    }
    let mut tally = Tally::new();
    for result in results {
        tally.record(result);
    }
    OverallStats {
        total_problems: tally.attempted,
        total_correct: tally.correct,
        accuracy: percent(u64::from(tally.correct), u64::from(tally.attempted)),
        avg_time: tally.avg_time(),
    }
}

#[must_use]
pub fn category_stats(results: &[ProblemResult]) -> Vec<CategoryStats> {
    tally_by_category(results)
        .into_iter()
        .map(|(category, t)| CategoryStats {
            category,
            attempted: t.attempted,
            correct: t.correct,
            avg_time: t.avg_time(),
        })
        .collect()
}

#[must_use]
pub fn timing_stats(results: &[ProblemResult]) -> Vec<TimingStats> {
    tally_by_category(results)
        .into_iter()
        .map(|(category, t)| TimingStats {
            category,
            avg_time: t.avg_time(),
            fastest: t.fastest,
            slowest: t.slowest,
            total_attempts: t.attempted,
        })
        .collect()
}

/// Lowest-accuracy categories first, ties kept in first-appearance order.
#[must_use]
pub fn weak_categories(
    results: &[ProblemResult],
    min_attempts: u32,
    limit: usize,
) -> Vec<WeakCategory> {
    let mut eligible: Vec<(f64, WeakCategory)> = tally_by_category(results)
        .into_iter()
        .filter(|(_, t)| t.attempted >= min_attempts && t.attempted > 0)
        .map(|(category, t)| {
            let ratio = f64::from(t.correct) / f64::from(t.attempted);
            let weak = WeakCategory {
                category,
                attempted: t.attempted,
                accuracy: percent(u64::from(t.correct), u64::from(t.attempted)),
            };
            (ratio, weak)
        })
        .collect();
    eligible.sort_by(|a, b| a.0.total_cmp(&b.0));
    eligible.into_iter().take(limit).map(|(_, w)| w).collect()
}

#[must_use]
pub fn miss_rate_by_category(results: &[ProblemResult]) -> Vec<MissRate> {
    tally_by_category(results)
        .into_iter()
        .map(|(category, t)| {
            let missed = t.attempted - t.correct;
            MissRate {
                category,
                missed,
                total: t.attempted,
                rate: percent(u64::from(missed), u64::from(t.attempted)),
            }
        })
        .collect()
}

/// Miss rates worth showing: enough attempts, at least one miss, worst first.
#[must_use]
pub fn ranked_miss_rates(results: &[ProblemResult]) -> Vec<MissRate> {
    let mut rates: Vec<MissRate> = miss_rate_by_category(results)
        .into_iter()
        .filter(|m| m.total >= MISS_RATE_MIN_ATTEMPTS && m.missed > 0)
        .collect();
    rates.sort_by(|a, b| b.rate.cmp(&a.rate));
    rates
}

//
// ─── SESSION HISTORY ───────────────────────────────────────────────────────────
//

/// One calendar day (UTC) of practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub problems_attempted: u32,
    pub problems_correct: u32,
    pub accuracy: u32,
    pub sessions_count: u32,
}

impl CalendarDay {
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            problems_attempted: 0,
            problems_correct: 0,
            accuracy: 0,
            sessions_count: 0,
        }
    }

    fn add(&mut self, session: &SessionStats) {
        self.problems_attempted = self
            .problems_attempted
            .saturating_add(session.problems_attempted());
        self.problems_correct = self
            .problems_correct
            .saturating_add(session.problems_correct());
        self.sessions_count = self.sessions_count.saturating_add(1);
        self.accuracy = percent(
            u64::from(self.problems_correct),
            u64::from(self.problems_attempted),
        );
    }
}

fn by_date(sessions: &[SessionStats]) -> Vec<&SessionStats> {
    let mut sorted: Vec<&SessionStats> = sessions.iter().collect();
    sorted.sort_by_key(|s| s.date());
    sorted
}

fn group_by_day(sessions: &[SessionStats]) -> BTreeMap<NaiveDate, CalendarDay> {
    let mut days: BTreeMap<NaiveDate, CalendarDay> = BTreeMap::new();
    for session in by_date(sessions) {
        let date = session.date().date_naive();
        days.entry(date)
            .or_insert_with(|| CalendarDay::empty(date))
            .add(session);
    }
    days
}

/// Practiced days only, oldest first.
#[must_use]
pub fn daily_history(sessions: &[SessionStats]) -> Vec<CalendarDay> {
    group_by_day(sessions).into_values().collect()
}

/// Exactly `days_back` entries ending at `today`, most recent first, with
/// zeroed entries for days without practice.
#[must_use]
pub fn practice_calendar(
    sessions: &[SessionStats],
    days_back: u32,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    let history = group_by_day(sessions);
    (0..days_back)
        .map(|offset| {
            let date = today - Duration::days(i64::from(offset));
            history
                .get(&date)
                .copied()
                .unwrap_or_else(|| CalendarDay::empty(date))
        })
        .collect()
}

#[must_use]
pub fn total_days_practiced(sessions: &[SessionStats]) -> usize {
    sessions
        .iter()
        .map(|s| s.date().date_naive())
        .collect::<BTreeSet<_>>()
        .len()
}

/// The latest `count` sessions, oldest first.
#[must_use]
pub fn recent_sessions(sessions: &[SessionStats], count: usize) -> Vec<SessionStats> {
    let sorted = by_date(sessions);
    let skip = sorted.len().saturating_sub(count);
    sorted.into_iter().skip(skip).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProblemId, SessionId};
    use chrono::{TimeZone, Utc};

    fn result(category: Category, is_correct: bool, time_spent: u32, timestamp: i64) -> ProblemResult {
        ProblemResult {
            problem_id: ProblemId::generate(),
            category,
            user_answer: Some(0.0),
            correct_answer: 0.0,
            is_correct,
            time_spent,
            timestamp,
        }
    }

    fn session(y: i32, m: u32, d: u32, hour: u32, attempted: usize, correct: usize) -> SessionStats {
        let results: Vec<ProblemResult> = (0..attempted)
            .map(|i| result(Category::Crosswind, i < correct, 5, 0))
            .collect();
        let date = Utc.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap();
        SessionStats::from_results(SessionId::generate(), date, 600, &results).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overall_stats_of_empty_log_is_zeroed() {
        assert_eq!(overall_stats(&[]), OverallStats::default());
    }

    #[test]
    fn overall_stats_rounds_accuracy_and_time() {
        let results = vec![
            result(Category::Crosswind, true, 3, 1),
            result(Category::Crosswind, true, 4, 2),
            result(Category::CloudBase, false, 4, 3),
        ];
        let stats = overall_stats(&results);
        assert_eq!(stats.total_problems, 3);
        assert_eq!(stats.total_correct, 2);
        assert_eq!(stats.accuracy, 67);
        assert_eq!(stats.avg_time, 4);
    }

    #[test]
    fn category_order_follows_first_appearance_by_time() {
        // store order is scrambled; timestamps decide
        let results = vec![
            result(Category::TurnRadius, true, 10, 30),
            result(Category::Crosswind, false, 2, 10),
            result(Category::TurnRadius, false, 6, 20),
            result(Category::Crosswind, true, 3, 40),
        ];
        let stats = category_stats(&results);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, Category::Crosswind);
        assert_eq!(stats[0].attempted, 2);
        assert_eq!(stats[0].correct, 1);
        assert_eq!(stats[0].avg_time, 3);
        assert_eq!(stats[1].category, Category::TurnRadius);
        assert_eq!(stats[1].avg_time, 8);

        let mut reversed = results.clone();
        reversed.reverse();
        assert_eq!(category_stats(&reversed), stats);
    }

    #[test]
    fn timing_tracks_fastest_and_slowest() {
        let results = vec![
            result(Category::GlideDistance, true, 12, 1),
            result(Category::GlideDistance, true, 4, 2),
            result(Category::GlideDistance, false, 9, 3),
        ];
        let timing = timing_stats(&results);
        assert_eq!(
            timing,
            vec![TimingStats {
                category: Category::GlideDistance,
                avg_time: 8,
                fastest: 4,
                slowest: 12,
                total_attempts: 3,
            }]
        );
    }

    #[test]
    fn weak_categories_need_enough_attempts() {
        let mut results = Vec::new();
        let mut ts = 0;
        let mut push = |category, correct: usize, total: usize, results: &mut Vec<ProblemResult>| {
            for i in 0..total {
                ts += 1;
                results.push(result(category, i < correct, 5, ts));
            }
        };
        push(Category::Crosswind, 4, 5, &mut results); // 80%
        push(Category::DriftAngle, 1, 5, &mut results); // 20%
        push(Category::CloudBase, 0, 4, &mut results); // too few
        push(Category::SlantRange, 3, 6, &mut results); // 50%
        push(Category::TurnRadius, 1, 5, &mut results); // 20%, tie

        let weak = weak_categories(&results, DEFAULT_MIN_ATTEMPTS, DEFAULT_WEAK_LIMIT);
        let order: Vec<Category> = weak.iter().map(|w| w.category).collect();
        assert_eq!(
            order,
            vec![
                Category::DriftAngle,
                Category::TurnRadius,
                Category::SlantRange,
                Category::Crosswind,
            ]
        );
        assert_eq!(weak[0].accuracy, 20);

        let top = weak_categories(&results, DEFAULT_MIN_ATTEMPTS, 1);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn miss_rates_rank_worst_first() {
        let mut results = Vec::new();
        for i in 0..5 {
            results.push(result(Category::Hydroplaning, i < 4, 5, i));
        }
        for i in 0..5 {
            results.push(result(Category::FuelWeight, i < 2, 5, 10 + i));
        }
        for i in 0..5 {
            results.push(result(Category::TurnRadius, true, 5, 20 + i));
        }
        for i in 0..3 {
            results.push(result(Category::CloudBase, false, 5, 30 + i));
        }

        let all = miss_rate_by_category(&results);
        assert_eq!(all.len(), 4);

        let ranked = ranked_miss_rates(&results);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category, Category::FuelWeight);
        assert_eq!(ranked[0].rate, 60);
        assert_eq!(ranked[1].category, Category::Hydroplaning);
        assert_eq!(ranked[1].missed, 1);
    }

    #[test]
    fn daily_history_sums_sessions_per_day() {
        let sessions = vec![
            session(2024, 3, 2, 9, 10, 5),
            session(2024, 3, 1, 8, 4, 4),
            session(2024, 3, 2, 18, 10, 10),
        ];
        let history = daily_history(&sessions);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, day(2024, 3, 1));
        assert_eq!(history[1].problems_attempted, 20);
        assert_eq!(history[1].problems_correct, 15);
        assert_eq!(history[1].accuracy, 75);
        assert_eq!(history[1].sessions_count, 2);
    }

    #[test]
    fn empty_calendar_has_zeroed_days_today_first() {
        let today = day(2024, 3, 10);
        let calendar = practice_calendar(&[], 365, today);
        assert_eq!(calendar.len(), 365);
        assert_eq!(calendar[0], CalendarDay::empty(today));
        assert_eq!(calendar[364].date, day(2023, 3, 12));
        assert!(calendar.iter().all(|d| d.sessions_count == 0));
    }

    #[test]
    fn calendar_fills_practiced_days() {
        let sessions = vec![session(2024, 3, 9, 12, 8, 6)];
        let calendar = practice_calendar(&sessions, 7, day(2024, 3, 10));
        assert_eq!(calendar.len(), 7);
        assert_eq!(calendar[0].problems_attempted, 0);
        assert_eq!(calendar[1].date, day(2024, 3, 9));
        assert_eq!(calendar[1].problems_attempted, 8);
        assert_eq!(calendar[1].accuracy, 75);
    }

    #[test]
    fn days_practiced_counts_distinct_dates() {
        let sessions = vec![
            session(2024, 3, 1, 8, 1, 1),
            session(2024, 3, 1, 20, 1, 0),
            session(2024, 3, 3, 8, 1, 1),
        ];
        assert_eq!(total_days_practiced(&sessions), 2);
        assert_eq!(total_days_practiced(&[]), 0);
    }

    #[test]
    fn recent_sessions_keeps_latest_oldest_first() {
        let sessions = vec![
            session(2024, 3, 3, 8, 1, 1),
            session(2024, 3, 1, 8, 2, 1),
            session(2024, 3, 2, 8, 3, 1),
        ];
        let recent = recent_sessions(&sessions, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].problems_attempted(), 3);
        assert_eq!(recent[1].problems_attempted(), 1);
        assert_eq!(recent_sessions(&sessions, 10).len(), 3);
    }
}
