//! Rate Limiter Module
//!
//! Fixed-window request throttling keyed by an opaque identifier
//! (normally the client IP). Windows are discrete: the counter resets
//! wholesale when `reset_at` passes rather than sliding. Up to
//! `2 * max` requests can land across a window boundary; that burst is
//! an accepted property of the algorithm, not something this module
//! tries to smooth over.
//!
//! The limiter never blocks traffic because of its own failure: if the
//! internal state is unusable the check fails open and admits the
//! request.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::http::HeaderMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::now_ms;

// == Preset ==
/// A `{window, max}` tuple for one endpoint class.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateLimitPreset {
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Maximum requests admitted per window
    pub max: u32,
}

/// Login attempts: 5 per 15 minutes.
pub const LOGIN: RateLimitPreset = RateLimitPreset {
    window_ms: 15 * 60 * 1000,
    max: 5,
};

/// Account registration: 3 per hour.
pub const REGISTER: RateLimitPreset = RateLimitPreset {
    window_ms: 60 * 60 * 1000,
    max: 3,
};

/// OTP issuance: 3 per 10 minutes.
pub const OTP_REQUEST: RateLimitPreset = RateLimitPreset {
    window_ms: 10 * 60 * 1000,
    max: 3,
};

/// Relaxed ceiling for read APIs: 100 per minute.
pub const READ_API: RateLimitPreset = RateLimitPreset {
    window_ms: 60 * 1000,
    max: 100,
};

// == Window Record ==
/// Per-identifier counter for the current window.
#[derive(Debug, Clone)]
struct WindowRecord {
    /// Requests observed in the current window (never capped or rolled back)
    count: u32,
    /// Absolute timestamp (ms) when the window resets
    reset_at: u64,
}

// == Decision ==
/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RateLimitDecision {
    /// Request admitted
    Allowed {
        limit: u32,
        remaining: u32,
        reset_at_ms: u64,
    },
    /// Request over the window's limit
    Denied {
        limit: u32,
        reset_at_ms: u64,
        retry_after_secs: u64,
    },
}

impl RateLimitDecision {
    /// True for `Allowed`.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// The window's limit, for `X-RateLimit-Limit`.
    pub fn limit(&self) -> u32 {
        match self {
            RateLimitDecision::Allowed { limit, .. } => *limit,
            RateLimitDecision::Denied { limit, .. } => *limit,
        }
    }

    /// Requests left in the window, for `X-RateLimit-Remaining`.
    pub fn remaining(&self) -> u32 {
        match self {
            RateLimitDecision::Allowed { remaining, .. } => *remaining,
            RateLimitDecision::Denied { .. } => 0,
        }
    }

    /// Window reset timestamp (ms), for `X-RateLimit-Reset`.
    pub fn reset_at_ms(&self) -> u64 {
        match self {
            RateLimitDecision::Allowed { reset_at_ms, .. } => *reset_at_ms,
            RateLimitDecision::Denied { reset_at_ms, .. } => *reset_at_ms,
        }
    }
}

// == Rate Limiter ==
/// Fixed-window counter store.
///
/// Interior mutability keeps `check` callable from concurrent handlers;
/// the mutex makes the read-increment-write sequence atomic, so N
/// concurrent checks for one identifier count exactly N.
#[derive(Debug, Default)]
pub struct RateLimiter {
    records: Mutex<HashMap<String, WindowRecord>>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a new limiter with no recorded identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    // == Check ==
    /// Records one request from `identifier` and decides whether it is
    /// within the preset's window limit.
    ///
    /// The first call for an identifier, or any call after the window
    /// has passed, starts a fresh window with `count = 0` before the
    /// increment. The count keeps incrementing while over the limit so
    /// sustained abuse keeps failing instead of resetting early.
    pub fn check(&self, identifier: &str, preset: RateLimitPreset) -> RateLimitDecision {
        let now = now_ms();

        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // Fail open: a limiter fault must not turn into an outage.
                warn!(identifier, "rate limiter state poisoned, failing open");
                drop(poisoned);
                return RateLimitDecision::Allowed {
                    limit: preset.max,
                    remaining: preset.max,
                    reset_at_ms: now + preset.window_ms,
                };
            }
        };

        let record = records
            .entry(identifier.to_string())
            .or_insert(WindowRecord {
                count: 0,
                reset_at: now + preset.window_ms,
            });

        if now >= record.reset_at {
            record.count = 0;
            record.reset_at = now + preset.window_ms;
        }

        record.count += 1;

        if record.count <= preset.max {
            RateLimitDecision::Allowed {
                limit: preset.max,
                remaining: preset.max - record.count,
                reset_at_ms: record.reset_at,
            }
        } else {
            debug!(identifier, count = record.count, "rate limit exceeded");
            RateLimitDecision::Denied {
                limit: preset.max,
                reset_at_ms: record.reset_at,
                retry_after_secs: record.reset_at.saturating_sub(now).div_ceil(1000),
            }
        }
    }

    // == Sweep Expired ==
    /// Removes records whose window has already reset, returning the
    /// number removed. Run periodically to bound memory.
    pub fn sweep_expired(&self) -> usize {
        let now = now_ms();
        let Ok(mut records) = self.records.lock() else {
            warn!("rate limiter state poisoned, skipping sweep");
            return 0;
        };
        let before = records.len();
        records.retain(|_, record| record.reset_at > now);
        before - records.len()
    }

    // == Length ==
    /// Number of identifiers currently tracked.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewinds an identifier's window so the next check starts fresh.
    /// Test hook for window-reset paths without sleeping.
    #[cfg(test)]
    pub(crate) fn force_window_elapsed(&self, identifier: &str) {
        if let Ok(mut records) = self.records.lock() {
            if let Some(record) = records.get_mut(identifier) {
                record.reset_at = 0;
            }
        }
    }
}

// == Client IP ==
/// Derives the throttling identifier from proxy headers.
///
/// Order: first entry of `X-Forwarded-For`, then `X-Real-IP`, then
/// `CF-Connecting-IP`, then the sentinel `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    if let Some(cf_ip) = headers.get("cf-connecting-ip").and_then(|v| v.to_str().ok()) {
        let cf_ip = cf_ip.trim();
        if !cf_ip.is_empty() {
            return cf_ip.to_string();
        }
    }

    "unknown".to_string()
}
