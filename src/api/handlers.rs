//! API Handlers
//!
//! HTTP request handlers for the cache, rate-limit, and OTP endpoints.
//! Sensitive routes call the rate limiter before doing any work, keyed
//! by the client IP derived from proxy headers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::limiter::{self, client_ip, RateLimitDecision, RateLimitPreset, RateLimiter};
use crate::models::{
    CacheGetResponse, CacheSetRequest, CacheSetResponse, HealthResponse, InvalidatePatternRequest,
    InvalidateResponse, OtpRequestBody, OtpRequestResponse, OtpVerifyBody, OtpVerifyResponse,
    StatsResponse,
};
use crate::otp::OtpStore;

/// Application state shared across all handlers.
///
/// The cache sits behind an async RwLock because its operations take
/// `&mut self`; the limiter and OTP store carry their own interior
/// locking and are shared directly.
#[derive(Clone)]
pub struct AppState {
    /// Query-result cache
    pub cache: Arc<RwLock<TtlCache>>,
    /// Fixed-window rate limiter
    pub limiter: Arc<RateLimiter>,
    /// One-time-passcode store
    pub otp: Arc<OtpStore>,
    /// OTP validity in seconds
    pub otp_ttl_secs: u64,
}

impl AppState {
    /// Creates a new AppState from already-constructed stores.
    pub fn new(cache: TtlCache, otp: OtpStore, otp_ttl_secs: u64) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(RateLimiter::new()),
            otp: Arc::new(otp),
            otp_ttl_secs,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TtlCache::new(config.max_cache_entries, config.default_ttl_ms),
            OtpStore::new(config.otp_country_code.clone()),
            config.otp_ttl_secs,
        )
    }
}

// == Rate Limit Gate ==
/// Checks the caller against a preset, converting a denial into the
/// 429 error carrying retry metadata.
///
/// The identifier is `<class>:<ip>` so each endpoint class gets its
/// own window; exhausting the OTP-request budget must not eat into
/// login attempts from the same address.
fn enforce_limit(
    limiter: &RateLimiter,
    headers: &HeaderMap,
    class: &str,
    preset: RateLimitPreset,
) -> Result<()> {
    match limiter.check(&format!("{}:{}", class, client_ip(headers)), preset) {
        RateLimitDecision::Allowed { .. } => Ok(()),
        RateLimitDecision::Denied {
            limit,
            reset_at_ms,
            retry_after_secs,
        } => Err(ApiError::RateLimited {
            limit,
            reset_at_ms,
            retry_after_secs,
        }),
    }
}

// == Cache Handlers ==

/// Handler for PUT /cache
///
/// Caches a payload under a key with an optional TTL.
pub async fn cache_set_handler(
    State(state): State<AppState>,
    Json(req): Json<CacheSetRequest>,
) -> Result<Json<CacheSetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, req.ttl_ms);

    Ok(Json(CacheSetResponse::new(req.key)))
}

/// Handler for GET /cache/:key
///
/// Returns the cached payload, or 404 on a miss. Absent and expired
/// are indistinguishable here: both mean the caller recomputes.
pub async fn cache_get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheGetResponse>> {
    // Write lock: a get may lazily purge an expired entry
    let mut cache = state.cache.write().await;
    match cache.get(&key) {
        Some(value) => Ok(Json(CacheGetResponse::new(key, value))),
        None => Err(ApiError::CacheMiss(key)),
    }
}

/// Handler for DELETE /cache/:key
///
/// Unconditional invalidation; removing an absent key is a no-op, not
/// an error.
pub async fn cache_delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let mut cache = state.cache.write().await;
    let removed = usize::from(cache.invalidate(&key));

    Json(InvalidateResponse { removed })
}

/// Handler for POST /cache/invalidate
///
/// Drops every entry matching a wildcard pattern. Used by write paths
/// to invalidate a whole query-key family after a mutation.
pub async fn cache_invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidatePatternRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let removed = cache.invalidate_pattern(&req.pattern);
    debug!(pattern = %req.pattern, removed, "pattern invalidation");

    Ok(Json(InvalidateResponse { removed }))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from_stats(&cache.stats()))
}

// == OTP Handlers ==

/// Handler for POST /otp/request
///
/// Issues a fresh code for the destination, gated by the OTP_REQUEST
/// preset per client IP. The code is delivered out of band; the
/// response only confirms issuance.
pub async fn otp_request_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<OtpRequestBody>,
) -> Result<Json<OtpRequestResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }
    enforce_limit(&state.limiter, &headers, "otp", limiter::OTP_REQUEST)?;

    let code = state.otp.issue(&req.destination, state.otp_ttl_secs * 1000);
    // Stand-in for the SMS/email gateway call
    info!(destination = %req.destination, code, "otp issued");

    Ok(Json(OtpRequestResponse::new(
        req.destination,
        state.otp_ttl_secs,
    )))
}

/// Handler for POST /otp/verify
///
/// Runs the verification protocol, gated by the LOGIN preset per
/// client IP. A matching code consumes the record.
pub async fn otp_verify_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<OtpVerifyBody>,
) -> Result<Json<OtpVerifyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }
    enforce_limit(&state.limiter, &headers, "login", limiter::LOGIN)?;

    state.otp.verify(&req.destination, &req.code)?;

    Ok(Json(OtpVerifyResponse::verified()))
}

// == Limiter Probe ==

/// Query parameters for the rate-limit probe.
#[derive(Debug, Deserialize)]
pub struct LimitProbeParams {
    /// Window length in milliseconds (default: READ_API window)
    pub window_ms: Option<u64>,
    /// Maximum requests per window (default: READ_API max)
    pub max: Option<u32>,
}

/// Handler for GET /limit/:identifier
///
/// Debug probe that records one request against an explicit identifier
/// and returns the decision, with the usual X-RateLimit-* headers.
pub async fn limit_probe_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(params): Query<LimitProbeParams>,
) -> impl IntoResponse {
    let preset = RateLimitPreset {
        window_ms: params.window_ms.unwrap_or(limiter::READ_API.window_ms),
        max: params.max.unwrap_or(limiter::READ_API.max),
    };

    let decision = state.limiter.check(&identifier, preset);
    let headers = [
        ("x-ratelimit-limit", decision.limit().to_string()),
        ("x-ratelimit-remaining", decision.remaining().to_string()),
        ("x-ratelimit-reset", decision.reset_at_ms().to_string()),
    ];

    (headers, Json(decision))
}

// == Health ==

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(TtlCache::new(100, 300_000), OtpStore::new("91"), 600)
    }

    #[tokio::test]
    async fn test_cache_set_and_get_handler() {
        let state = test_state();

        let req = CacheSetRequest {
            key: "services:all".to_string(),
            value: json!([{"id": 1}]),
            ttl_ms: None,
        };
        let result = cache_set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let result = cache_get_handler(State(state), Path("services:all".to_string())).await;
        let response = result.unwrap().0;
        assert_eq!(response.value, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_cache_get_miss() {
        let state = test_state();

        let result = cache_get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(ApiError::CacheMiss(_))));
    }

    #[tokio::test]
    async fn test_cache_delete_absent_is_noop() {
        let state = test_state();

        let response =
            cache_delete_handler(State(state), Path("nonexistent".to_string())).await;
        assert_eq!(response.0.removed, 0);
    }

    #[tokio::test]
    async fn test_cache_invalidate_pattern_handler() {
        let state = test_state();

        for key in ["services:A", "services:B", "other:C"] {
            let req = CacheSetRequest {
                key: key.to_string(),
                value: json!(1),
                ttl_ms: None,
            };
            cache_set_handler(State(state.clone()), Json(req)).await.unwrap();
        }

        let req = InvalidatePatternRequest {
            pattern: "services:*".to_string(),
        };
        let response = cache_invalidate_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.0.removed, 2);

        assert!(cache_get_handler(State(state), Path("other:C".to_string()))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_otp_request_then_verify() {
        let state = test_state();
        let headers = HeaderMap::new();

        let req = OtpRequestBody {
            destination: "9876543210".to_string(),
        };
        otp_request_handler(State(state.clone()), headers.clone(), Json(req))
            .await
            .unwrap();

        // fish the issued code out of the store, as the auth flow would
        let code = state.otp.get("9876543210").unwrap().code;

        let req = OtpVerifyBody {
            destination: "+919876543210".to_string(),
            code,
        };
        let response = otp_verify_handler(State(state), headers, Json(req))
            .await
            .unwrap();
        assert!(response.0.verified);
    }

    #[tokio::test]
    async fn test_otp_request_rate_limited() {
        let state = test_state();
        let headers = HeaderMap::new();

        // OTP_REQUEST admits 3 per window for one client
        for _ in 0..3 {
            let req = OtpRequestBody {
                destination: "9876543210".to_string(),
            };
            otp_request_handler(State(state.clone()), headers.clone(), Json(req))
                .await
                .unwrap();
        }

        let req = OtpRequestBody {
            destination: "9876543210".to_string(),
        };
        let result = otp_request_handler(State(state), headers, Json(req)).await;
        assert!(matches!(result, Err(ApiError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_otp_request_budget_does_not_consume_login_budget() {
        let state = test_state();
        let headers = HeaderMap::new();

        // exhaust the OTP_REQUEST window for this client
        for _ in 0..4 {
            let req = OtpRequestBody {
                destination: "9876543210".to_string(),
            };
            let _ = otp_request_handler(State(state.clone()), headers.clone(), Json(req)).await;
        }

        // all 5 LOGIN-gated attempts still reach the verification
        // protocol; none is turned away by the limiter
        for _ in 0..5 {
            let req = OtpVerifyBody {
                destination: "9123456780".to_string(),
                code: "000000".to_string(),
            };
            let result = otp_verify_handler(State(state.clone()), headers.clone(), Json(req)).await;
            assert!(
                !matches!(result, Err(ApiError::RateLimited { .. })),
                "verify window must be independent of the request window"
            );
        }
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.0.status, "healthy");
    }
}
