use pilot_core::Clock;
use pilot_core::streak::{StreakState, advance};
use storage::repository::{AttemptStore, Storage};
use tracing::{info, warn};

use crate::error::ProgressError;
use crate::persist::{Write, persist};

/// Reads and moves the daily practice streak.
#[derive(Clone)]
pub struct StreakService {
    clock: Clock,
    storage: Storage,
}

impl StreakService {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        Self { clock, storage }
    }

    /// Count today as a practice day and store the new state.
    ///
    /// Recording twice on the same day is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the streak cannot be read from
    /// either store, or if neither store accepts the update.
    pub async fn record_practice(&self) -> Result<StreakState, ProgressError> {
        let today = self.clock.today();
        let (before, source) = self.read_state().await?;
        let after = advance(before, today);
        if after != before {
            match source {
                Source::Primary => persist(&self.storage, Write::Streak(&after)).await?,
                Source::Fallback(store) => store.save_streak_state(&after).await?,
            }
            info!(
                current = after.current_streak,
                longest = after.longest_streak,
                "streak updated"
            );
        }
        Ok(after)
    }

    /// Stored state as of today: a streak whose last day is more than a day
    /// back reads as zero.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the streak cannot be read from
    /// either store.
    pub async fn current(&self) -> Result<StreakState, ProgressError> {
        let (mut state, _) = self.read_state().await?;
        state.current_streak = state.current_on(self.clock.today());
        Ok(state)
    }

    async fn read_state(&self) -> Result<(StreakState, Source<'_>), ProgressError> {
        let err = match self.storage.attempts.streak_state().await {
            Ok(state) => return Ok((state, Source::Primary)),
            Err(e) => e,
        };
        let Some(fallback) = self.storage.fallback.as_deref() else {
            return Err(err.into());
        };
        warn!(error = %err, "streak read failed, reading fallback store");
        let state = fallback.streak_state().await?;
        Ok((state, Source::Fallback(fallback)))
    }
}

/// Store the streak was read from; an update goes back to the same place.
enum Source<'a> {
    Primary,
    Fallback(&'a dyn AttemptStore),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pilot_core::time::fixed_now;

    #[tokio::test]
    async fn consecutive_days_extend_then_gap_resets() {
        let storage = Storage::in_memory();
        let mut clock = Clock::fixed(fixed_now());

        let day_one = StreakService::new(clock, storage.clone());
        assert_eq!(day_one.record_practice().await.unwrap().current_streak, 1);
        assert_eq!(day_one.record_practice().await.unwrap().current_streak, 1);

        clock.advance(Duration::days(1));
        let day_two = StreakService::new(clock, storage.clone());
        assert_eq!(day_two.record_practice().await.unwrap().current_streak, 2);

        clock.advance(Duration::days(3));
        let later = StreakService::new(clock, storage.clone());
        assert_eq!(later.current().await.unwrap().current_streak, 0);
        let state = later.record_practice().await.unwrap();
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 2);
    }

    #[tokio::test]
    async fn unreadable_primary_advances_fallback_streak() {
        use std::sync::Arc;

        use storage::repository::{AttemptStore, InMemoryRepository};

        use crate::persist::tests::Unreachable;

        let fallback = InMemoryRepository::new();
        let storage = Storage {
            attempts: Arc::new(Unreachable),
            fallback: Some(Arc::new(fallback.clone())),
        };
        let mut clock = Clock::fixed(fixed_now());

        let state = StreakService::new(clock, storage.clone())
            .record_practice()
            .await
            .unwrap();
        assert_eq!(state.current_streak, 1);
        assert_eq!(fallback.streak_state().await.unwrap().current_streak, 1);

        clock.advance(Duration::days(1));
        let next_day = StreakService::new(clock, storage.clone());
        assert_eq!(next_day.current().await.unwrap().current_streak, 1);
        assert_eq!(next_day.record_practice().await.unwrap().current_streak, 2);
        assert_eq!(fallback.streak_state().await.unwrap().current_streak, 2);
    }

    #[tokio::test]
    async fn unreadable_primary_without_fallback_is_an_error() {
        use std::sync::Arc;

        use crate::persist::tests::Unreachable;

        let storage = Storage {
            attempts: Arc::new(Unreachable),
            fallback: None,
        };
        let service = StreakService::new(Clock::fixed(fixed_now()), storage);

        assert!(matches!(
            service.record_practice().await,
            Err(ProgressError::Storage(_))
        ));
    }
}
