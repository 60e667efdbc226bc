use chrono::{NaiveDate, NaiveDateTime};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};

use crate::data::models::{ProgressSummary, ReviewRecord, StorageError};
use crate::schema::{progress_summaries, review_records};

/// Row of `review_records`; timestamps are stored as naive UTC
#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = review_records)]
#[diesel(primary_key(learner_id, content_type, content_id))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewRecordRow {
    pub learner_id: String,
    pub content_type: String,
    pub content_id: String,
    pub interval_days: i32,
    pub ease_factor: f64,
    pub due_at: NaiveDateTime,
    pub correct_streak: i32,
    pub incorrect_count: i32,
    pub last_seen_at: Option<NaiveDateTime>,
}

impl From<&ReviewRecord> for ReviewRecordRow {
    fn from(record: &ReviewRecord) -> Self {
        Self {
            learner_id: record.learner_id.clone(),
            content_type: record.content_type.as_str().to_string(),
            content_id: record.content_id.clone(),
            interval_days: record.interval_days,
            ease_factor: record.ease_factor,
            due_at: record.due_at.naive_utc(),
            correct_streak: record.correct_streak,
            incorrect_count: record.incorrect_count,
            last_seen_at: record.last_seen_at.map(|t| t.naive_utc()),
        }
    }
}

impl TryFrom<ReviewRecordRow> for ReviewRecord {
    type Error = StorageError;

    fn try_from(row: ReviewRecordRow) -> Result<Self, Self::Error> {
        let content_type = row.content_type.parse().map_err(|_| {
            StorageError::CorruptRow(format!(
                "review_records({}, {}) has content_type {:?}",
                row.learner_id, row.content_id, row.content_type
            ))
        })?;

        Ok(ReviewRecord {
            learner_id: row.learner_id,
            content_id: row.content_id,
            content_type,
            interval_days: row.interval_days,
            ease_factor: row.ease_factor,
            due_at: row.due_at.and_utc(),
            correct_streak: row.correct_streak,
            incorrect_count: row.incorrect_count,
            last_seen_at: row.last_seen_at.map(|t| t.and_utc()),
        })
    }
}

/// Row of `progress_summaries`
#[derive(Debug, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = progress_summaries)]
#[diesel(primary_key(learner_id))]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProgressSummaryRow {
    pub learner_id: String,
    pub total_reviews: i64,
    pub correct_reviews: i64,
    pub last_study_date: Option<NaiveDate>,
    pub streak_days: i32,
    pub points: i64,
    pub level: i32,
}

impl From<&ProgressSummary> for ProgressSummaryRow {
    fn from(summary: &ProgressSummary) -> Self {
        Self {
            learner_id: summary.learner_id.clone(),
            total_reviews: summary.total_reviews,
            correct_reviews: summary.correct_reviews,
            last_study_date: summary.last_study_date,
            streak_days: summary.streak_days,
            points: summary.points,
            level: summary.level,
        }
    }
}

impl From<ProgressSummaryRow> for ProgressSummary {
    fn from(row: ProgressSummaryRow) -> Self {
        Self {
            learner_id: row.learner_id,
            total_reviews: row.total_reviews,
            correct_reviews: row.correct_reviews,
            last_study_date: row.last_study_date,
            streak_days: row.streak_days,
            points: row.points,
            level: row.level,
        }
    }
}
