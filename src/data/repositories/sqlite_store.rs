use diesel::prelude::*;

use crate::data::db::{DbConnection, DbPool};
use crate::data::models::{
    ContentKey, ProgressSummary, ProgressSummaryRow, ReviewRecord, ReviewRecordRow, SrsError, StorageError,
};
use crate::data::repositories::{ReviewStore, ReviewUpdate};
use crate::schema::{progress_summaries, review_records};

/// Diesel/SQLite adapter. Every write is a single-row upsert.
#[derive(Clone)]
pub struct SqliteReviewStore {
    pool: DbPool,
}

impl SqliteReviewStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, StorageError> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            StorageError::from(e)
        })
    }

    fn find_record(
        conn: &mut SqliteConnection,
        learner_id: &str,
        key: &ContentKey,
    ) -> Result<Option<ReviewRecord>, StorageError> {
        review_records::table
            .filter(review_records::learner_id.eq(learner_id))
            .filter(review_records::content_type.eq(key.content_type.as_str()))
            .filter(review_records::content_id.eq(&key.content_id))
            .select(ReviewRecordRow::as_select())
            .first::<ReviewRecordRow>(conn)
            .optional()?
            .map(ReviewRecord::try_from)
            .transpose()
    }

    fn find_summary(conn: &mut SqliteConnection, learner_id: &str) -> Result<Option<ProgressSummary>, StorageError> {
        let row = progress_summaries::table
            .filter(progress_summaries::learner_id.eq(learner_id))
            .select(ProgressSummaryRow::as_select())
            .first::<ProgressSummaryRow>(conn)
            .optional()?;
        Ok(row.map(ProgressSummary::from))
    }

    fn upsert_record(conn: &mut SqliteConnection, record: &ReviewRecord) -> Result<(), StorageError> {
        let row = ReviewRecordRow::from(record);
        diesel::insert_into(review_records::table)
            .values(&row)
            .on_conflict((
                review_records::learner_id,
                review_records::content_type,
                review_records::content_id,
            ))
            .do_update()
            .set(&row)
            .execute(conn)?;
        Ok(())
    }

    fn upsert_summary(conn: &mut SqliteConnection, summary: &ProgressSummary) -> Result<(), StorageError> {
        let row = ProgressSummaryRow::from(summary);
        diesel::insert_into(progress_summaries::table)
            .values(&row)
            .on_conflict(progress_summaries::learner_id)
            .do_update()
            .set(&row)
            .execute(conn)?;
        Ok(())
    }
}

impl ReviewStore for SqliteReviewStore {
    fn load_records(&self, learner_id: &str) -> Result<Vec<ReviewRecord>, StorageError> {
        let mut conn = self.conn()?;
        review_records::table
            .filter(review_records::learner_id.eq(learner_id))
            .order_by((review_records::due_at.asc(), review_records::content_id.asc()))
            .select(ReviewRecordRow::as_select())
            .load::<ReviewRecordRow>(&mut conn)?
            .into_iter()
            .map(ReviewRecord::try_from)
            .collect()
    }

    fn load_record(&self, learner_id: &str, key: &ContentKey) -> Result<Option<ReviewRecord>, StorageError> {
        let mut conn = self.conn()?;
        Self::find_record(&mut conn, learner_id, key)
    }

    fn save_record(&self, record: &ReviewRecord) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        Self::upsert_record(&mut conn, record)
    }

    fn load_summary(&self, learner_id: &str) -> Result<Option<ProgressSummary>, StorageError> {
        let mut conn = self.conn()?;
        Self::find_summary(&mut conn, learner_id)
    }

    fn save_summary(&self, summary: &ProgressSummary) -> Result<(), StorageError> {
        let mut conn = self.conn()?;
        Self::upsert_summary(&mut conn, summary)
    }

    fn apply_review(
        &self,
        learner_id: &str,
        key: &ContentKey,
        update: &mut ReviewUpdate<'_>,
    ) -> Result<(ReviewRecord, ProgressSummary), SrsError> {
        let mut conn = self.conn()?;

        // IMMEDIATE takes the write lock before the reads below
        conn.immediate_transaction::<_, SrsError, _>(|conn| {
            let record = Self::find_record(conn, learner_id, key)?;
            let summary = Self::find_summary(conn, learner_id)?.unwrap_or_else(|| ProgressSummary::new(learner_id));

            let (record, summary) = update(record, summary)?;

            Self::upsert_record(conn, &record)?;
            Self::upsert_summary(conn, &summary)?;
            Ok((record, summary))
        })
    }
}
