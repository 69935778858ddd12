//! API error taxonomy and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{Logger, Severity};
use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body missing a field or carrying the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Unrecognized or malformed query parameter value
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Path identifier is not syntactically a store id
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// API key header absent on a gated endpoint
    #[error("API key required")]
    MissingApiKey,

    /// API key header present but wrong
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Valid identifier, no matching record
    #[error("{0} not found")]
    NotFound(&'static str),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure; detail is logged, never returned to the caller
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,

            ApiError::MissingApiKey => StatusCode::UNAUTHORIZED,
            ApiError::InvalidApiKey => StatusCode::FORBIDDEN,

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(ref store_err) = self {
            Logger::log(
                Severity::Error,
                "store_error",
                &[("detail", &store_err.to_string())],
            );
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
