use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::data::models::{ContentKey, ProgressSummary, ReviewRecord, SrsError, StorageError};
use crate::data::repositories::{ReviewStore, ReviewUpdate};

/// In-process adapter for single-device use and tests.
///
/// Each record and each summary is its own map entry, so concurrent reviews of
/// different items never overwrite each other.
#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    records: DashMap<(String, ContentKey), ReviewRecord>,
    summaries: DashMap<String, ProgressSummary>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReviewStore for MemoryReviewStore {
    fn load_records(&self, learner_id: &str) -> Result<Vec<ReviewRecord>, StorageError> {
        let mut records: Vec<ReviewRecord> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == learner_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.content_id.cmp(&b.content_id)));
        Ok(records)
    }

    fn load_record(&self, learner_id: &str, key: &ContentKey) -> Result<Option<ReviewRecord>, StorageError> {
        Ok(self
            .records
            .get(&(learner_id.to_string(), key.clone()))
            .map(|r| r.value().clone()))
    }

    fn save_record(&self, record: &ReviewRecord) -> Result<(), StorageError> {
        self.records
            .insert((record.learner_id.clone(), record.key()), record.clone());
        Ok(())
    }

    fn load_summary(&self, learner_id: &str) -> Result<Option<ProgressSummary>, StorageError> {
        Ok(self.summaries.get(learner_id).map(|s| s.value().clone()))
    }

    fn save_summary(&self, summary: &ProgressSummary) -> Result<(), StorageError> {
        self.summaries.insert(summary.learner_id.clone(), summary.clone());
        Ok(())
    }

    fn apply_review(
        &self,
        learner_id: &str,
        key: &ContentKey,
        update: &mut ReviewUpdate<'_>,
    ) -> Result<(ReviewRecord, ProgressSummary), SrsError> {
        // The summary entry stays locked until both writes are done, which
        // serializes reviews of the same learner.
        let slot = self.summaries.entry(learner_id.to_string());
        let summary = match &slot {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(_) => ProgressSummary::new(learner_id),
        };

        let record_key = (learner_id.to_string(), key.clone());
        let record = self.records.get(&record_key).map(|r| r.value().clone());

        let (record, summary) = update(record, summary)?;

        self.records.insert(record_key, record.clone());
        slot.insert(summary.clone());
        Ok((record, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use chrono::{TimeZone, Utc};

    use crate::data::models::{ContentType, ReviewOutcome, ValidationError};
    use crate::features::srs::{ReviewService, SchedulingPolicy};

    #[test]
    fn test_records_are_scoped_per_learner() {
        let store = MemoryReviewStore::new();
        let key = ContentKey::new(ContentType::Flashcard, "c1");
        store.save_record(&ReviewRecord::new("ana", &key)).unwrap();
        store.save_record(&ReviewRecord::new("ben", &key)).unwrap();

        assert_eq!(store.load_records("ana").unwrap().len(), 1);
        assert!(store.load_record("carl", &key).unwrap().is_none());
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let store = MemoryReviewStore::new();
        let key = ContentKey::new(ContentType::Vocabulary, "w1");

        let mut reject = |_: Option<ReviewRecord>, _: ProgressSummary| -> Result<(ReviewRecord, ProgressSummary), SrsError> {
            Err(ValidationError::QualityOutOfRange(8).into())
        };
        let result = store.apply_review("ana", &key, &mut reject);

        assert!(result.is_err());
        assert!(store.load_record("ana", &key).unwrap().is_none());
        assert!(store.load_summary("ana").unwrap().is_none());
    }

    #[test]
    fn test_apply_review_writes_both() {
        let store = MemoryReviewStore::new();
        let key = ContentKey::new(ContentType::Phrase, "p1");

        let mut bump = |record: Option<ReviewRecord>,
                        mut summary: ProgressSummary|
         -> Result<(ReviewRecord, ProgressSummary), SrsError> {
            assert!(record.is_none());
            summary.total_reviews += 1;
            Ok((ReviewRecord::new("ana", &key), summary))
        };
        let (record, summary) = store.apply_review("ana", &key, &mut bump).unwrap();

        assert_eq!(store.load_record("ana", &key).unwrap(), Some(record));
        assert_eq!(store.load_summary("ana").unwrap(), Some(summary));
    }

    #[test]
    fn test_concurrent_reviews_do_not_lose_updates() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let service = ReviewService::new(Arc::new(MemoryReviewStore::new()), SchedulingPolicy::default());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                thread::spawn(move || {
                    for _ in 0..5 {
                        service
                            .submit_review_at(
                                "ana",
                                &format!("word-{i}"),
                                ContentType::Vocabulary,
                                ReviewOutcome::Graded(4),
                                now,
                            )
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let summary = service.get_summary("ana").unwrap();
        assert_eq!(summary.total_reviews, 40);
        assert_eq!(summary.points, 400);
        assert_eq!(summary.level, 5);

        let records = service.list_records("ana").unwrap();
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.correct_streak == 5));
    }
}
