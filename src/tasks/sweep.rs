//! Periodic Sweep Task
//!
//! Background task that bounds memory across all three stores. Lazy
//! expiry already hides stale entries from readers; the sweep reclaims
//! the ones nobody re-reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::limiter::RateLimiter;
use crate::otp::OtpStore;

/// Spawns a background task that periodically sweeps expired state
/// from the cache, the rate limiter, and the OTP store.
///
/// The task runs in an infinite loop, sleeping for the configured
/// interval between runs. The cache sweep takes the write lock only
/// for the duration of the sweep; the limiter and OTP store use their
/// own internal locks, so request handling is never blocked for longer
/// than one sweep pass.
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful
/// shutdown.
pub fn spawn_sweep_task(
    cache: Arc<RwLock<TtlCache>>,
    limiter: Arc<RateLimiter>,
    otp: Arc<OtpStore>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let cache_removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };
            let limiter_removed = limiter.sweep_expired();
            let otp_removed = otp.cleanup();

            if cache_removed + limiter_removed + otp_removed > 0 {
                info!(
                    cache = cache_removed,
                    limiter = limiter_removed,
                    otp = otp_removed,
                    "sweep removed expired state"
                );
            } else {
                debug!("sweep found nothing expired");
            }
        }
    })
}
