use crate::data::models::{ContentKey, ProgressSummary, ReviewRecord, SrsError, StorageError};

/// Read-modify-write step for one review: gets the stored record (if any) and
/// the learner's summary (defaults if absent), returns both updated.
pub type ReviewUpdate<'a> =
    dyn FnMut(Option<ReviewRecord>, ProgressSummary) -> Result<(ReviewRecord, ProgressSummary), SrsError> + 'a;

/// Persistence adapter for review records and progress summaries.
///
/// Writes are per key: one record row per (learner, content type, content id)
/// and one summary row per learner. Implementations never rewrite a learner's
/// whole collection to change a single entry.
pub trait ReviewStore: Send + Sync {
    fn load_records(&self, learner_id: &str) -> Result<Vec<ReviewRecord>, StorageError>;

    fn load_record(&self, learner_id: &str, key: &ContentKey) -> Result<Option<ReviewRecord>, StorageError>;

    /// Inserts or replaces the record identified by the record's own key.
    fn save_record(&self, record: &ReviewRecord) -> Result<(), StorageError>;

    fn load_summary(&self, learner_id: &str) -> Result<Option<ProgressSummary>, StorageError>;

    fn save_summary(&self, summary: &ProgressSummary) -> Result<(), StorageError>;

    /// Runs `update` and persists its output atomically: either both the
    /// record and the summary are written, or neither is.
    fn apply_review(
        &self,
        learner_id: &str,
        key: &ContentKey,
        update: &mut ReviewUpdate<'_>,
    ) -> Result<(ReviewRecord, ProgressSummary), SrsError>;
}
