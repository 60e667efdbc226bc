pub mod db_models;
pub mod error_models;
pub mod progress_models;
pub mod request_models;
pub mod srs_models;

pub use db_models::{ProgressSummaryRow, ReviewRecordRow};
pub use error_models::{SrsError, StorageError, ValidationError};
pub use progress_models::ProgressSummary;
pub use request_models::{DueItemsRequest, ResetItemPath, ReviewRequest, ReviewResponse, SummaryResponse};
pub use srs_models::{
    ContentKey, ContentRef, ContentType, Quality, ReviewOutcome, ReviewRecord,
    INITIAL_EASE_FACTOR, MIN_EASE_FACTOR,
};
