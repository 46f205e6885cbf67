//! HTTP error types for the server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::KvError;

/// Error wrapper for converting store errors to HTTP responses.
///
/// Every kind maps to 500; a missing key is not an error.
#[derive(Debug)]
pub struct ApiError(pub KvError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Request failed: {}", self.0);

        let body = serde_json::json!({ "error": self.0.to_string() });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<KvError> for ApiError {
    fn from(err: KvError) -> Self {
        ApiError(err)
    }
}
