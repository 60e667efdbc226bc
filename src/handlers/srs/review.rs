use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use validator::Validate;

use crate::data::models::{ContentType, ResetItemPath, ReviewRecord, ReviewRequest, ReviewResponse, SrsError};
use crate::features::srs::ReviewService;
use crate::handlers::srs::run_blocking;

pub async fn submit_review(
    State(service): State<ReviewService>,
    Path(learner_id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResponse>, SrsError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let outcome = payload.outcome()?;

    let result = run_blocking(move || {
        service.submit_review(&learner_id, &payload.content_id, payload.content_type, outcome)
    })
    .await?;

    Ok(Json(ReviewResponse {
        record: result.record,
        summary: result.summary.into(),
    }))
}

pub async fn reset_item(
    State(service): State<ReviewService>,
    Path(path): Path<ResetItemPath>,
) -> Result<Json<ReviewRecord>, SrsError> {
    let content_type: ContentType = path.content_type.parse()?;
    path.validate()?;

    let record =
        run_blocking(move || service.reset_item(&path.learner_id, &path.content_id, content_type)).await?;
    Ok(Json(record))
}

pub async fn list_records(
    State(service): State<ReviewService>,
    Path(learner_id): Path<String>,
) -> Result<Json<Vec<ReviewRecord>>, SrsError> {
    let records = run_blocking(move || service.list_records(&learner_id)).await?;
    Ok(Json(records))
}
