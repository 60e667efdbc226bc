use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-learner gamification counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub learner_id: String,
    pub total_reviews: i64,
    pub correct_reviews: i64,
    pub last_study_date: Option<NaiveDate>,
    pub streak_days: i32,
    pub points: i64,
    pub level: i32,
}

impl ProgressSummary {
    pub fn new(learner_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            total_reviews: 0,
            correct_reviews: 0,
            last_study_date: None,
            streak_days: 0,
            points: 0,
            level: 1,
        }
    }

    /// Share of reviews answered correctly, 0.0 before the first review
    pub fn accuracy(&self) -> f64 {
        if self.total_reviews == 0 {
            0.0
        } else {
            self.correct_reviews as f64 / self.total_reviews as f64
        }
    }
}
