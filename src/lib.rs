//! Gatekeep - in-process request throttling and ephemeral secrets
//!
//! Three independent in-memory stores behind one HTTP facade: a TTL
//! cache for query results, a fixed-window rate limiter keyed by
//! client IP, and a single-use OTP store keyed by normalized phone
//! number or email. All state is volatile; a restart wipes everything.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod otp;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
