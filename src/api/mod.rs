//! API Module
//!
//! HTTP handlers and routing for the service facade.
//!
//! # Endpoints
//! - `PUT /cache` - Cache a payload under a key
//! - `GET /cache/:key` - Retrieve a cached payload
//! - `DELETE /cache/:key` - Invalidate a key
//! - `POST /cache/invalidate` - Invalidate by wildcard pattern
//! - `GET /cache/stats` - Cache statistics
//! - `POST /otp/request` - Issue a verification code
//! - `POST /otp/verify` - Verify a code
//! - `GET /limit/:identifier` - Rate-limit probe
//! - `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
