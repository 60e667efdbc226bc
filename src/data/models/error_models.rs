use diesel::result::Error as DieselError;
use thiserror::Error;

// Input problems, raised before anything is mutated
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Quality {0} is outside the accepted range 0..=5")]
    QualityOutOfRange(i32),
    #[error("Unknown content type: {0}")]
    UnknownContentType(String),
    #[error("Exactly one of `quality` or `correct` must be provided")]
    AmbiguousOutcome,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

// Persistence adapter failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(String),
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
    #[error("Background task failed: {0}")]
    TaskError(String),
}

// Everything the review service can fail with
#[derive(Error, Debug)]
pub enum SrsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
