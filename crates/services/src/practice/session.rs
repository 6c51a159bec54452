use chrono::{DateTime, Duration, Utc};
use pilot_core::evaluator::{check_answer, parse_answer};
use pilot_core::model::{
    Category, Problem, ProblemResult, SessionId, SessionStats, SessionStatsError,
};
use pilot_core::numeric::percent;

use super::length::SessionLength;
use super::progress::SessionProgress;
use crate::error::SessionError;

/// Seconds left at which the timer switches to its warning state.
pub const WARNING_THRESHOLD_SECS: u32 = 60;

//
// ─── ANSWERS AND OUTCOMES ──────────────────────────────────────────────────────
//

/// Verdict for one submitted answer, with the problem it answered so the
/// explanation can be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub problem: Problem,
    pub result: ProblemResult,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.result.is_correct
    }
}

/// What ending a session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// `None` when nothing was answered; such sessions are not stored.
    pub stats: Option<SessionStats>,
    pub elapsed_seconds: u32,
    /// Whether the summary reached a store. `true` when there was nothing to
    /// store.
    pub saved: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one timed practice session.
///
/// Holds at most one open problem at a time. Time only moves through
/// [`PracticeSession::tick`], so the stored duration is the number of
/// unpaused seconds the timer actually ran. Time spent paused is also left
/// out of each answer's `time_spent`.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    id: SessionId,
    category: Option<Category>,
    length: SessionLength,
    started_at: DateTime<Utc>,
    remaining: u32,
    paused_at: Option<DateTime<Utc>>,
    current: Option<Problem>,
    problem_started_at: DateTime<Utc>,
    /// Paused time since the open problem was loaded, not counting a pause
    /// still in progress.
    problem_paused_for: Duration,
    results: Vec<ProblemResult>,
    outcome: Option<SessionOutcome>,
}

impl PracticeSession {
    #[must_use]
    pub fn new(length: SessionLength, category: Option<Category>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::generate(),
            category,
            length,
            started_at,
            remaining: length.seconds(),
            paused_at: None,
            current: None,
            problem_started_at: started_at,
            problem_paused_for: Duration::zero(),
            results: Vec::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Category every problem is drawn from, or `None` for a mix.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn length(&self) -> SessionLength {
        self.length
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.length.seconds().saturating_sub(self.remaining)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        !self.is_ended() && self.remaining < WARNING_THRESHOLD_SECS
    }

    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn results(&self) -> &[ProblemResult] {
        &self.results
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = u32::try_from(self.results.len()).unwrap_or(u32::MAX);
        let correct = u32::try_from(self.results.iter().filter(|r| r.is_correct).count())
            .unwrap_or(u32::MAX);
        SessionProgress {
            answered,
            correct,
            accuracy: percent(u64::from(correct), u64::from(answered)),
            remaining_seconds: self.remaining,
            total_seconds: self.length.seconds(),
            is_warning: self.is_warning(),
            is_paused: self.is_paused(),
            is_ended: self.is_ended(),
        }
    }

    /// Stop the timer. Pausing twice keeps the first pause time.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if !self.is_ended() && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.paused_at.take() {
            self.problem_paused_for =
                self.problem_paused_for + paused_span(since, self.problem_started_at, now);
        }
    }

    /// Advance the timer by one second.
    ///
    /// Returns `true` once the timer has run out. Paused or ended sessions do
    /// not move and return `false`.
    pub fn tick(&mut self) -> bool {
        if self.is_paused() || self.is_ended() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }

    /// Make `problem` the open problem, replacing any unanswered one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after the session has ended.
    pub fn load_problem(
        &mut self,
        problem: Problem,
        now: DateTime<Utc>,
    ) -> Result<&Problem, SessionError> {
        if self.is_ended() {
            return Err(SessionError::Ended);
        }
        self.problem_started_at = now;
        self.problem_paused_for = Duration::zero();
        Ok(self.current.insert(problem))
    }

    /// Score raw input against the open problem.
    ///
    /// Input that is not a finite number is ignored: `Ok(None)` is returned
    /// and the problem stays open. A scored answer closes the problem and is
    /// appended to the session results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after the session has ended, or
    /// `SessionError::NoProblem` when nothing is open.
    pub fn answer(
        &mut self,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AnswerFeedback>, SessionError> {
        if self.is_ended() {
            return Err(SessionError::Ended);
        }
        if self.current.is_none() {
            return Err(SessionError::NoProblem);
        }
        let Some(value) = parse_answer(raw) else {
            return Ok(None);
        };
        let Some(problem) = self.current.take() else {
            return Err(SessionError::NoProblem);
        };

        let is_correct = check_answer(&problem, value);
        let open_pause = self
            .paused_at
            .map_or_else(Duration::zero, |since| paused_span(since, self.problem_started_at, now));
        let active = now - self.problem_started_at - self.problem_paused_for - open_pause;
        let time_spent = whole_seconds(active);
        let result = ProblemResult::new(
            &problem,
            Some(value),
            is_correct,
            time_spent,
            now.timestamp_millis(),
        );
        self.results.push(result.clone());

        Ok(Some(AnswerFeedback { problem, result }))
    }

    /// Summary for the session so far, or `None` if nothing was answered.
    pub(crate) fn summarize(
        &self,
        ended_at: DateTime<Utc>,
    ) -> Result<Option<SessionStats>, SessionError> {
        match SessionStats::from_results(self.id, ended_at, self.elapsed_seconds(), &self.results)
        {
            Ok(stats) => Ok(Some(stats)),
            Err(SessionStatsError::Empty) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn close(&mut self, outcome: SessionOutcome) -> &SessionOutcome {
        self.current = None;
        self.paused_at = None;
        self.outcome.insert(outcome)
    }
}

/// Part of a pause from `since` to `until` that falls after `problem_start`.
fn paused_span(since: DateTime<Utc>, problem_start: DateTime<Utc>, until: DateTime<Utc>) -> Duration {
    (until - since.max(problem_start)).max(Duration::zero())
}

/// Rounded whole seconds in `span`, never negative.
fn whole_seconds(span: Duration) -> u32 {
    let millis = span.num_milliseconds().max(0);
    u32::try_from((millis + 500) / 1000).unwrap_or(u32::MAX)
}
