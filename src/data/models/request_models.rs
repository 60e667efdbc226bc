use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::data::models::{ContentRef, ContentType, ProgressSummary, ReviewOutcome, ReviewRecord, ValidationError};

/// Body of `POST /api/learners/{learner_id}/reviews`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[validate(length(min = 1, max = 256, message = "contentId must be 1-256 characters"))]
    pub content_id: String,
    pub content_type: ContentType,
    pub quality: Option<i32>,
    pub correct: Option<bool>,
}

impl ReviewRequest {
    pub fn outcome(&self) -> Result<ReviewOutcome, ValidationError> {
        match (self.quality, self.correct) {
            (Some(q), None) => Ok(ReviewOutcome::Graded(q)),
            (None, Some(correct)) => Ok(ReviewOutcome::Boolean(correct)),
            _ => Err(ValidationError::AmbiguousOutcome),
        }
    }
}

/// Path of `POST /api/learners/{learner_id}/items/{content_type}/{content_id}/reset`.
/// `content_type` stays a string so it is reported as an unknown content type.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetItemPath {
    pub learner_id: String,
    pub content_type: String,
    #[validate(length(min = 1, max = 256, message = "contentId must be 1-256 characters"))]
    pub content_id: String,
}

/// Body of `POST /api/learners/{learner_id}/due`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DueItemsRequest {
    #[validate(length(max = 1000, message = "At most 1000 candidates per request"))]
    pub candidates: Vec<ContentRef>,
    #[serde(default = "default_due_limit")]
    #[validate(range(max = 500, message = "limit must not exceed 500"))]
    pub limit: usize,
}

fn default_due_limit() -> usize {
    20
}

/// Result of a review: the rescheduled record plus the learner's updated counters
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub record: ReviewRecord,
    pub summary: SummaryResponse,
}

/// Summary as sent over the wire, with derived accuracy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: ProgressSummary,
    pub accuracy: f64,
}

impl From<ProgressSummary> for SummaryResponse {
    fn from(summary: ProgressSummary) -> Self {
        let accuracy = summary.accuracy();
        Self { summary, accuracy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_request_needs_exactly_one_outcome() {
        let both: ReviewRequest = serde_json::from_value(serde_json::json!({
            "contentId": "w1", "contentType": "vocabulary", "quality": 4, "correct": true
        }))
        .unwrap();
        assert!(matches!(both.outcome(), Err(ValidationError::AmbiguousOutcome)));

        let graded: ReviewRequest = serde_json::from_value(serde_json::json!({
            "contentId": "w1", "contentType": "vocabulary", "quality": 4
        }))
        .unwrap();
        assert_eq!(graded.outcome().unwrap(), ReviewOutcome::Graded(4));
    }

    #[test]
    fn test_reset_path_bounds_content_id() {
        let path = |id: String| ResetItemPath {
            learner_id: "ana".into(),
            content_type: "vocabulary".into(),
            content_id: id,
        };
        assert!(path("w1".into()).validate().is_ok());
        assert!(path("x".repeat(256)).validate().is_ok());
        assert!(path("x".repeat(257)).validate().is_err());
    }

    #[test]
    fn test_due_request_defaults_limit() {
        let req: DueItemsRequest = serde_json::from_value(serde_json::json!({
            "candidates": [{"id": "a", "type": "phrase"}]
        }))
        .unwrap();
        assert_eq!(req.limit, 20);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_due_request_rejects_large_limit() {
        let req: DueItemsRequest = serde_json::from_value(serde_json::json!({
            "candidates": [], "limit": 501
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
