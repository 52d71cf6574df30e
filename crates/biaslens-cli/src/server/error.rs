//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use biaslens::BiasLensError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client (missing form fields, unreadable upload).
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// Error from the biaslens library.
    Analysis(BiasLensError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Analysis(e) if e.is_input_error() => StatusCode::BAD_REQUEST,
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal",
            ApiError::Analysis(e) => match e {
                BiasLensError::ColumnNotFound { .. } => "column_not_found",
                BiasLensError::EmptyGroupDistribution { .. } => "empty_group_distribution",
                BiasLensError::MalformedInput(_) => "malformed_input",
                BiasLensError::InvalidBucketPolicy(_) => "invalid_bucket_policy",
                _ => "internal",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.kind().to_string();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
            ApiError::Analysis(e) => e.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(%error, "{}", message);
        }

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<BiasLensError> for ApiError {
    fn from(err: BiasLensError) -> Self {
        ApiError::Analysis(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Analysis(e) => write!(f, "Analysis error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
