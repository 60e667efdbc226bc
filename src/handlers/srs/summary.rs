use axum::extract::{Json, Path, State};

use crate::data::models::{SrsError, SummaryResponse};
use crate::features::srs::ReviewService;
use crate::handlers::srs::run_blocking;

pub async fn get_summary(
    State(service): State<ReviewService>,
    Path(learner_id): Path<String>,
) -> Result<Json<SummaryResponse>, SrsError> {
    let summary = run_blocking(move || service.get_summary(&learner_id)).await?;
    Ok(Json(summary.into()))
}

pub async fn clear_history(
    State(service): State<ReviewService>,
    Path(learner_id): Path<String>,
) -> Result<Json<SummaryResponse>, SrsError> {
    let summary = run_blocking(move || service.clear_history(&learner_id)).await?;
    Ok(Json(summary.into()))
}
