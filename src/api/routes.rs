//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_delete_handler, cache_get_handler, cache_invalidate_handler, cache_set_handler,
    cache_stats_handler, health_handler, limit_probe_handler, otp_request_handler,
    otp_verify_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache` - Cache a payload under a key
/// - `GET /cache/stats` - Cache statistics
/// - `GET /cache/:key` - Retrieve a cached payload
/// - `DELETE /cache/:key` - Invalidate a key
/// - `POST /cache/invalidate` - Invalidate by wildcard pattern
/// - `POST /otp/request` - Issue a verification code (rate limited)
/// - `POST /otp/verify` - Verify a code (rate limited)
/// - `GET /limit/:identifier` - Rate-limit probe
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: allows any origin (configurable for production)
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", put(cache_set_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/invalidate", post(cache_invalidate_handler))
        .route("/cache/:key", get(cache_get_handler))
        .route("/cache/:key", delete(cache_delete_handler))
        .route("/otp/request", post(otp_request_handler))
        .route("/otp/verify", post(otp_verify_handler))
        .route("/limit/:identifier", get(limit_probe_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
