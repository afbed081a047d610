//! Response DTOs for the HTTP facade
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for the cache GET operation (GET /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct CacheGetResponse {
    /// The requested key
    pub key: String,
    /// The cached payload
    pub value: Value,
}

impl CacheGetResponse {
    /// Creates a new CacheGetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the cache SET operation (PUT /cache)
#[derive(Debug, Clone, Serialize)]
pub struct CacheSetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl CacheSetResponse {
    /// Creates a new CacheSetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached successfully", key),
            key,
        }
    }
}

/// Response body for invalidation operations
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Current number of entries
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Successful retrievals
    pub hits: u64,
    /// Failed retrievals
    pub misses: u64,
    /// Capacity evictions
    pub evictions: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a StatsResponse from cache statistics.
    pub fn from_stats(stats: &CacheStats) -> Self {
        Self {
            size: stats.size,
            max_size: stats.max_size,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for OTP issuance (POST /otp/request)
///
/// The code itself is never returned; it is delivered out of band.
#[derive(Debug, Clone, Serialize)]
pub struct OtpRequestResponse {
    /// Status message
    pub message: String,
    /// Echo of the destination the code was issued for
    pub destination: String,
    /// Seconds until the code expires
    pub expires_in_secs: u64,
    /// Issuance time
    pub requested_at: DateTime<Utc>,
}

impl OtpRequestResponse {
    /// Creates a new OtpRequestResponse
    pub fn new(destination: impl Into<String>, expires_in_secs: u64) -> Self {
        Self {
            message: "Verification code sent".to_string(),
            destination: destination.into(),
            expires_in_secs,
            requested_at: Utc::now(),
        }
    }
}

/// Response body for OTP verification (POST /otp/verify)
#[derive(Debug, Clone, Serialize)]
pub struct OtpVerifyResponse {
    /// Status message
    pub message: String,
    /// Always true on the success path; failures are ApiError responses
    pub verified: bool,
}

impl OtpVerifyResponse {
    /// Creates a success response.
    pub fn verified() -> Self {
        Self {
            message: "Verification successful".to_string(),
            verified: true,
        }
    }
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Server time
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Creates a healthy status response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}
