use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use validator::Validate;

use crate::data::models::{ContentRef, DueItemsRequest, SrsError};
use crate::features::srs::ReviewService;
use crate::handlers::srs::run_blocking;

// Candidates come from the caller; the scheduler only orders and filters them.
pub async fn due_items(
    State(service): State<ReviewService>,
    Path(learner_id): Path<String>,
    payload: Result<Json<DueItemsRequest>, JsonRejection>,
) -> Result<Json<Vec<ContentRef>>, SrsError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let due = run_blocking(move || service.get_due_items(&learner_id, &payload.candidates, payload.limit)).await?;
    Ok(Json(due))
}
