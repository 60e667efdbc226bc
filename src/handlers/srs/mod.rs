use axum::{
    routing::{get, post},
    Router,
};

use crate::data::models::{SrsError, StorageError};
use crate::features::srs::ReviewService;

pub mod due;
pub mod review;
pub mod summary;

/// Routes nested under `/api/learners`
pub fn srs_router(service: ReviewService) -> Router {
    Router::new()
        .route("/{learner_id}/reviews", post(review::submit_review))
        .route("/{learner_id}/records", get(review::list_records))
        .route(
            "/{learner_id}/items/{content_type}/{content_id}/reset",
            post(review::reset_item),
        )
        .route("/{learner_id}/due", post(due::due_items))
        .route(
            "/{learner_id}/summary",
            get(summary::get_summary).delete(summary::clear_history),
        )
        .with_state(service)
}

/// Diesel is synchronous; keep its I/O off the async workers.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, SrsError>
where
    F: FnOnce() -> Result<T, SrsError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(StorageError::TaskError(e.to_string()).into()),
    }
}
