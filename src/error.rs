//! Error types for the gatekeep service
//!
//! Provides unified error handling using thiserror. Expected
//! conditions (cache miss, window exhausted, code expired) are normal
//! return values in the store modules; this type is the HTTP-facing
//! taxonomy the route layer maps them into.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::otp::OtpError;

// == Api Error Enum ==
/// Unified error type for the HTTP facade.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache key not found (or expired, indistinguishable by design)
    #[error("Key not found: {0}")]
    CacheMiss(String),

    /// OTP verification failure
    #[error(transparent)]
    Otp(#[from] OtpError),

    /// Request over the rate limit for its endpoint class
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited {
        limit: u32,
        reset_at_ms: u64,
        retry_after_secs: u64,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::CacheMiss(key) => (StatusCode::NOT_FOUND, format!("Key not found: {}", key)),
            ApiError::Otp(OtpError::NotFound) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Otp(OtpError::Expired) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Otp(OtpError::Mismatch) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        let mut response = (status, body).into_response();

        // 429 responses carry retry metadata as headers
        if let ApiError::RateLimited {
            limit,
            reset_at_ms,
            retry_after_secs,
        } = self
        {
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                headers.insert(header::RETRY_AFTER, value);
            }
            if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
                headers.insert("x-ratelimit-limit", value);
            }
            headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
            if let Ok(value) = HeaderValue::from_str(&reset_at_ms.to_string()) {
                headers.insert("x-ratelimit-reset", value);
            }
        }

        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP facade.
pub type Result<T> = std::result::Result<T, ApiError>;
