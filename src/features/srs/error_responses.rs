use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::data::models::{SrsError, ValidationError};

impl SrsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SrsError::Validation(ValidationError::InvalidRequest(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            SrsError::Validation(_) => StatusCode::BAD_REQUEST,
            SrsError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SrsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            SrsError::Validation(e) => {
                log::warn!("Rejected request: {}", e);
                e.to_string()
            }
            SrsError::Storage(e) => {
                log::error!("Storage failure: {}", e);
                format!("Storage error: {}", e)
            }
        };

        let body = json!({
            "error": message,
            "status": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}
