//! HTTP error mapping for the generation flows.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use storywheel_error::{SeedStoreError, ValidationError};
use storywheel_models::UpstreamError;
use tracing::error;

/// Failure of a flow before its stream opened (or of a non-streaming flow).
///
/// Once a stream is open, upstream failure becomes the stream's terminal
/// event instead of one of these.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// Request rejected before any remote call
    #[display("{}", _0)]
    Validation(ValidationError),

    /// Seed store infrastructure failure (distinct from "no seed")
    #[display("{}", _0)]
    SeedStore(SeedStoreError),

    /// Remote completion or image endpoint failed
    #[display("{}", _0)]
    Upstream(UpstreamError),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status this failure maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::SeedStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(err) => err
                .status_code()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(err) => err.message.clone(),
            ApiError::SeedStore(err) => err.message.clone(),
            ApiError::Upstream(err) => err.to_string(),
        };
        error!(status = %status, message = %message, "Request failed");
        (status, Json(json!({ "error": message }))).into_response()
    }
}
