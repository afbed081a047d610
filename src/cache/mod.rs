//! Cache Module
//!
//! In-memory caching with per-entry TTL, wildcard invalidation, and an
//! oldest-first capacity bound. Used to memoize expensive list queries
//! (categories, services) for the route layer.

mod entry;
mod order;
mod pattern;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{now_ms, CacheEntry};
pub use order::InsertionTracker;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
