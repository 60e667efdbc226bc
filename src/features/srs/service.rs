use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::data::models::{
    ContentKey, ContentRef, ContentType, ProgressSummary, ReviewOutcome, ReviewRecord, SrsError,
};
use crate::data::repositories::ReviewStore;
use crate::features::srs::{DueQueue, ProgressAggregator, Scheduler, SchedulingPolicy};

/// Record and summary after a review has been applied
#[derive(Debug, Clone)]
pub struct SubmittedReview {
    pub record: ReviewRecord,
    pub summary: ProgressSummary,
}

/// Public entry point for collaborators (HTTP layer, CLI, tests).
///
/// The store is injected so the same service runs on SQLite or in memory.
/// Each operation has an `_at` twin taking the clock value explicitly.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn ReviewStore>,
    scheduler: Scheduler,
}

impl ReviewService {
    pub fn new(store: Arc<dyn ReviewStore>, policy: SchedulingPolicy) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(policy),
        }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.scheduler.policy()
    }

    pub fn submit_review(
        &self,
        learner_id: &str,
        content_id: &str,
        content_type: ContentType,
        outcome: ReviewOutcome,
    ) -> Result<SubmittedReview, SrsError> {
        self.submit_review_at(learner_id, content_id, content_type, outcome, Utc::now())
    }

    /// Schedules one review and folds it into the learner's summary in the
    /// same storage transaction. Unseen items are created on the fly.
    pub fn submit_review_at(
        &self,
        learner_id: &str,
        content_id: &str,
        content_type: ContentType,
        outcome: ReviewOutcome,
        now: DateTime<Utc>,
    ) -> Result<SubmittedReview, SrsError> {
        outcome.validate()?;

        let key = ContentKey::new(content_type, content_id);
        let scheduler = self.scheduler;
        let today = now.date_naive();

        let mut apply = |record: Option<ReviewRecord>,
                         summary: ProgressSummary|
         -> Result<(ReviewRecord, ProgressSummary), SrsError> {
            let record = record.unwrap_or_else(|| ReviewRecord::new(learner_id, &key));
            let scheduled = scheduler.review(&record, outcome, now)?;
            let summary = ProgressAggregator::record_review(&summary, scheduled.was_correct, today);
            Ok((scheduled.record, summary))
        };
        let (record, summary) = self.store.apply_review(learner_id, &key, &mut apply)?;

        log::debug!(
            "Scheduled {} for {}: interval {}d, due {}",
            key,
            learner_id,
            record.interval_days,
            record.due_at
        );

        Ok(SubmittedReview { record, summary })
    }

    /// Due candidates, earliest first, at most `limit`. A candidate listed
    /// more than once is returned at most once, at its first position.
    pub fn get_due_items(
        &self,
        learner_id: &str,
        candidates: &[ContentRef],
        limit: usize,
    ) -> Result<Vec<ContentRef>, SrsError> {
        self.get_due_items_at(learner_id, candidates, limit, Utc::now())
    }

    pub fn get_due_items_at(
        &self,
        learner_id: &str,
        candidates: &[ContentRef],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentRef>, SrsError> {
        if candidates.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let records = self.store.load_records(learner_id)?;
        let due_dates = DueQueue::index(&records);
        Ok(DueQueue::select_due(candidates, &due_dates, now, limit))
    }

    pub fn reset_item(
        &self,
        learner_id: &str,
        content_id: &str,
        content_type: ContentType,
    ) -> Result<ReviewRecord, SrsError> {
        self.reset_item_at(learner_id, content_id, content_type, Utc::now())
    }

    /// Returns the item to its initial schedule, due one day from `now`.
    /// The learner's summary is left alone.
    pub fn reset_item_at(
        &self,
        learner_id: &str,
        content_id: &str,
        content_type: ContentType,
        now: DateTime<Utc>,
    ) -> Result<ReviewRecord, SrsError> {
        let key = ContentKey::new(content_type, content_id);
        let record = self.scheduler.reset(&ReviewRecord::new(learner_id, &key), now);
        self.store.save_record(&record)?;

        log::debug!("Reset {} for {}", key, learner_id);
        Ok(record)
    }

    pub fn get_summary(&self, learner_id: &str) -> Result<ProgressSummary, SrsError> {
        Ok(self
            .store
            .load_summary(learner_id)?
            .unwrap_or_else(|| ProgressSummary::new(learner_id)))
    }

    pub fn list_records(&self, learner_id: &str) -> Result<Vec<ReviewRecord>, SrsError> {
        Ok(self.store.load_records(learner_id)?)
    }

    /// Starts the learner's counters over. Review records are kept.
    pub fn clear_history(&self, learner_id: &str) -> Result<ProgressSummary, SrsError> {
        let summary = ProgressSummary::new(learner_id);
        self.store.save_summary(&summary)?;

        log::info!("Cleared progress history for {}", learner_id);
        Ok(summary)
    }
}
