//! Mapping of lookup errors onto HTTP responses
//!
//! Internal failures are logged with their cause and answered with a generic
//! message; database error text never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::LookupError;

pub const MISSING_WORD_MESSAGE: &str = "Missing required query parameter: word";

#[derive(Debug)]
pub struct AppError(pub LookupError);

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match self.0 {
            LookupError::InvalidInput(message) => json!({ "error": message }),
            LookupError::NotFound { word } => json!({
                "word": word,
                "results": [],
                "message": "Not found",
            }),
            LookupError::Internal(cause) => {
                tracing::error!("Search failed: {}", cause);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}
