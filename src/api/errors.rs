//! Mapping of pipeline errors onto HTTP responses

use crate::HarvestError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error returned by API handlers
///
/// Rendered as `{"error": "..."}` with a status derived from the cause.
#[derive(Debug)]
pub struct ApiError(HarvestError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            HarvestError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<HarvestError> for ApiError {
    fn from(err: HarvestError) -> Self {
        Self(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self(HarvestError::Serialization(err))
    }
}
