use chrono::{DateTime, Utc};

use crate::data::models::{ReviewOutcome, ReviewRecord, ValidationError, INITIAL_EASE_FACTOR};
use crate::features::srs::SchedulingPolicy;

/// Result of scheduling one review
#[derive(Debug, Clone)]
pub struct ScheduledReview {
    pub record: ReviewRecord,
    pub was_correct: bool,
}

/// Pure scheduling engine: no storage, no clock of its own
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    policy: SchedulingPolicy,
}

impl Scheduler {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Computes the next interval, ease factor and due date for `record`.
    ///
    /// The outcome is validated before anything is touched, so an invalid
    /// grade leaves the caller's record exactly as it was.
    pub fn review(
        &self,
        record: &ReviewRecord,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> Result<ScheduledReview, ValidationError> {
        outcome.validate()?;

        let mut next = record.clone();
        let was_correct = self.policy.apply(&mut next, outcome)?;
        next.schedule_from(now);

        Ok(ScheduledReview {
            record: next,
            was_correct,
        })
    }

    /// Puts a record back to its initial configuration, due tomorrow.
    pub fn reset(&self, record: &ReviewRecord, now: DateTime<Utc>) -> ReviewRecord {
        let mut next = record.clone();
        next.interval_days = 1;
        next.ease_factor = INITIAL_EASE_FACTOR;
        next.correct_streak = 0;
        next.incorrect_count = 0;
        next.schedule_from(now);
        next.last_seen_at = None;
        next
    }
}
