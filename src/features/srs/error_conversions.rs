use axum::extract::rejection::JsonRejection;
use diesel::result::Error as DieselError;
use r2d2::Error as PoolError;
use validator::ValidationErrors;

use crate::data::models::{SrsError, StorageError, ValidationError};

impl From<PoolError> for StorageError {
    fn from(err: PoolError) -> Self {
        StorageError::PoolError(err.to_string())
    }
}

impl From<DieselError> for SrsError {
    fn from(err: DieselError) -> Self {
        SrsError::Storage(StorageError::DatabaseError(err))
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(err: ValidationErrors) -> Self {
        ValidationError::InvalidRequest(err.to_string())
    }
}

impl From<ValidationErrors> for SrsError {
    fn from(err: ValidationErrors) -> Self {
        SrsError::Validation(err.into())
    }
}

impl From<JsonRejection> for SrsError {
    fn from(rejection: JsonRejection) -> Self {
        SrsError::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}
