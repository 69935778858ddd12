//! Access gate for item mutation endpoints.
//!
//! A single shared secret compared for equality. Missing header and wrong
//! key are distinct failures (401 vs 403). No state, no side effects.

use axum::http::HeaderMap;

use super::errors::{ApiError, ApiResult};

/// Request header carrying the shared secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Check the shared-secret header against the configured secret.
///
/// `configured` is `None` when the server was started without a secret;
/// the gate then denies every presented key, so gated mutations are
/// effectively disabled rather than open.
pub fn require_api_key(headers: &HeaderMap, configured: Option<&str>) -> ApiResult<()> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingApiKey)?;

    match configured {
        Some(secret) if presented == secret => Ok(()),
        _ => Err(ApiError::InvalidApiKey),
    }
}
