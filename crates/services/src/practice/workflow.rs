use pilot_core::Clock;
use pilot_core::model::{Category, Problem};
use pilot_core::problems::generate_problem_with;
use pilot_core::random::Sampler;
use storage::repository::Storage;
use tracing::{error, info, warn};

use super::length::SessionLength;
use super::session::{AnswerFeedback, PracticeSession, SessionOutcome};
use crate::error::SessionError;
use crate::persist::{Write, persist};
use crate::streak_service::StreakService;

/// Orchestrates a practice session: problem flow, the timer, and persistence.
///
/// Storage failures while a session runs are logged and never returned; a
/// result or summary that neither store accepts is only kept in memory.
#[derive(Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    storage: Storage,
    streaks: StreakService,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        let streaks = StreakService::new(clock, storage.clone());
        Self {
            clock,
            storage,
            streaks,
        }
    }

    #[must_use]
    pub fn with_clock(self, clock: Clock) -> Self {
        Self::new(clock, self.storage)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a timed session and count today toward the streak.
    ///
    /// The session opens without a problem; call
    /// [`PracticeLoopService::next_problem`] to draw the first one.
    pub async fn start_session(
        &self,
        length: SessionLength,
        category: Option<Category>,
    ) -> PracticeSession {
        let session = PracticeSession::new(length, category, self.clock.now());
        if let Err(e) = self.streaks.record_practice().await {
            warn!(error = %e, "streak update failed");
        }
        info!(
            session = %session.id(),
            minutes = length.minutes(),
            category = category.map_or("all", Category::slug),
            "practice session started"
        );
        session
    }

    /// Draw a fresh problem for the session's category and open it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` once the session has ended.
    pub fn next_problem<'s>(
        &self,
        session: &'s mut PracticeSession,
        sampler: &mut dyn Sampler,
    ) -> Result<&'s Problem, SessionError> {
        if session.is_ended() {
            return Err(SessionError::Ended);
        }
        let problem = generate_problem_with(session.category(), sampler);
        session.load_problem(problem, self.clock.now())
    }

    /// Score `raw` against the open problem and store the result.
    ///
    /// Returns `Ok(None)` for input that is not a number.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` or `SessionError::NoProblem` when there
    /// is nothing to answer.
    pub async fn submit_answer(
        &self,
        session: &mut PracticeSession,
        raw: &str,
    ) -> Result<Option<AnswerFeedback>, SessionError> {
        let Some(feedback) = session.answer(raw, self.clock.now())? else {
            return Ok(None);
        };
        if let Err(e) = persist(&self.storage, Write::Result(&feedback.result)).await {
            error!(error = %e, problem = %feedback.result.problem_id, "result was not stored");
        }
        Ok(Some(feedback))
    }

    /// Stop the session timer until [`Self::resume`].
    pub fn pause(&self, session: &mut PracticeSession) {
        session.pause(self.clock.now());
    }

    pub fn resume(&self, session: &mut PracticeSession) {
        session.resume(self.clock.now());
    }

    /// Advance the timer one second, ending the session when it runs out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the final summary cannot be built.
    pub async fn tick(
        &self,
        session: &mut PracticeSession,
    ) -> Result<Option<SessionOutcome>, SessionError> {
        if session.tick() {
            self.end_session(session).await.map(Some)
        } else {
            Ok(None)
        }
    }

    /// End the session and store its summary.
    ///
    /// Safe to call more than once: later calls return the first outcome and
    /// store nothing. A session with no answers is never stored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the summary cannot be built.
    pub async fn end_session(
        &self,
        session: &mut PracticeSession,
    ) -> Result<SessionOutcome, SessionError> {
        if let Some(outcome) = session.outcome() {
            return Ok(outcome.clone());
        }

        let stats = session.summarize(self.clock.now())?;
        let saved = match &stats {
            Some(stats) => match persist(&self.storage, Write::Session(stats)).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, session = %stats.id(), "session summary was not stored");
                    false
                }
            },
            None => true,
        };

        let outcome = SessionOutcome {
            stats,
            elapsed_seconds: session.elapsed_seconds(),
            saved,
        };
        info!(
            session = %session.id(),
            answered = session.results().len(),
            elapsed = outcome.elapsed_seconds,
            saved,
            "practice session ended"
        );
        Ok(session.close(outcome).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::tests::Unreachable;
    use chrono::Duration;
    use pilot_core::random::ScriptedSampler;
    use pilot_core::time::fixed_now;
    use std::sync::Arc;
    use storage::repository::{AttemptStore, InMemoryRepository};

    fn service(repo: &InMemoryRepository) -> PracticeLoopService {
        let storage = Storage {
            attempts: Arc::new(repo.clone()),
            fallback: None,
        };
        PracticeLoopService::new(Clock::fixed(fixed_now()), storage)
    }

    fn five_minutes() -> SessionLength {
        SessionLength::from_minutes(5).unwrap()
    }

    #[tokio::test]
    async fn ending_twice_stores_one_summary() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = svc
            .start_session(five_minutes(), Some(Category::Crosswind))
            .await;
        // 20 kts at 30°
        svc.next_problem(&mut session, &mut ScriptedSampler::new([4, 2]))
            .unwrap();
        svc.submit_answer(&mut session, "10").await.unwrap().unwrap();

        let first = svc.end_session(&mut session).await.unwrap();
        let second = svc.end_session(&mut session).await.unwrap();

        assert_eq!(first, second);
        assert!(first.saved);
        assert_eq!(repo.list_sessions().await.unwrap().len(), 1);
        assert_eq!(repo.list_results().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_session_is_not_stored() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = svc.start_session(five_minutes(), None).await;

        let outcome = svc.end_session(&mut session).await.unwrap();

        assert_eq!(outcome.stats, None);
        assert!(repo.list_sessions().await.unwrap().is_empty());
        assert_eq!(repo.streak_state().await.unwrap().current_streak, 1);
    }

    #[tokio::test]
    async fn timer_expiry_ends_with_elapsed_duration() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = svc.start_session(five_minutes(), None).await;
        svc.next_problem(&mut session, &mut ScriptedSampler::new([6, 4, 2]))
            .unwrap();
        svc.submit_answer(&mut session, "13").await.unwrap();

        let mut ended = None;
        for _ in 0..300 {
            if let Some(outcome) = svc.tick(&mut session).await.unwrap() {
                ended = Some(outcome);
            }
        }
        let outcome = ended.expect("timer ran out");
        let stats = outcome.stats.unwrap();

        assert_eq!(stats.duration(), 300);
        assert_eq!(stats.problems_attempted(), 1);
        assert_eq!(stats.problems_correct(), 0);
        assert!(svc.tick(&mut session).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ending_early_keeps_answers() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = svc.start_session(five_minutes(), None).await;
        for _ in 0..30 {
            svc.tick(&mut session).await.unwrap();
        }
        svc.next_problem(&mut session, &mut ScriptedSampler::new([1, 0]))
            .unwrap();
        let later = svc
            .clone()
            .with_clock(Clock::fixed(fixed_now() + Duration::seconds(4)));
        let feedback = later
            .submit_answer(&mut session, "181")
            .await
            .unwrap()
            .unwrap();
        assert!(feedback.is_correct());
        assert_eq!(feedback.result.time_spent, 4);

        let outcome = later.end_session(&mut session).await.unwrap();
        let stats = outcome.stats.unwrap();
        assert_eq!(stats.duration(), 30);
        assert_eq!(stats.accuracy(), 100);
        assert_eq!(stats.average_time(), 4);
    }

    #[tokio::test]
    async fn unreachable_primary_falls_back_to_local() {
        let local = InMemoryRepository::new();
        let storage = Storage {
            attempts: Arc::new(Unreachable),
            fallback: Some(Arc::new(local.clone())),
        };
        let svc = PracticeLoopService::new(Clock::fixed(fixed_now()), storage);

        let mut session = svc.start_session(five_minutes(), None).await;
        svc.next_problem(&mut session, &mut ScriptedSampler::new([6, 4, 2]))
            .unwrap();
        svc.submit_answer(&mut session, "10").await.unwrap();
        let outcome = svc.end_session(&mut session).await.unwrap();

        assert!(outcome.saved);
        assert_eq!(local.list_results().await.unwrap().len(), 1);
        assert_eq!(local.list_sessions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreachable_store_without_fallback_still_ends() {
        let storage = Storage {
            attempts: Arc::new(Unreachable),
            fallback: None,
        };
        let svc = PracticeLoopService::new(Clock::fixed(fixed_now()), storage);
        let mut session = svc.start_session(five_minutes(), None).await;
        svc.next_problem(&mut session, &mut ScriptedSampler::new([6, 4, 2]))
            .unwrap();
        assert!(svc.submit_answer(&mut session, "10").await.unwrap().is_some());

        let outcome = svc.end_session(&mut session).await.unwrap();
        assert!(!outcome.saved);
        assert!(outcome.stats.is_some());
    }

    #[tokio::test]
    async fn no_problem_after_end() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo);
        let mut session = svc.start_session(five_minutes(), None).await;
        svc.end_session(&mut session).await.unwrap();

        assert!(matches!(
            svc.next_problem(&mut session, &mut ScriptedSampler::new([0])),
            Err(SessionError::Ended)
        ));
    }
}
