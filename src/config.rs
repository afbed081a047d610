//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_cache_entries: usize,
    /// Default cache TTL in milliseconds for entries without explicit TTL
    pub default_ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds (cache, limiter, OTP store)
    pub sweep_interval: u64,
    /// OTP validity in seconds
    pub otp_ttl_secs: u64,
    /// Country code applied to bare 10-digit phone numbers
    pub otp_country_code: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL_MS` - Default cache TTL in ms (default: 60000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 900)
    /// - `OTP_TTL_SECS` - OTP validity in seconds (default: 600)
    /// - `OTP_COUNTRY_CODE` - Default phone country code (default: 91)
    pub fn from_env() -> Self {
        Self {
            max_cache_entries: env::var("MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(900),
            otp_ttl_secs: env::var("OTP_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            otp_country_code: env::var("OTP_COUNTRY_CODE").unwrap_or_else(|_| "91".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_entries: 1000,
            default_ttl_ms: 60_000,
            server_port: 3000,
            sweep_interval: 900,
            otp_ttl_secs: 600,
            otp_country_code: "91".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.default_ttl_ms, 60_000);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 900);
        assert_eq!(config.otp_ttl_secs, 600);
        assert_eq!(config.otp_country_code, "91");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_CACHE_ENTRIES");
        env::remove_var("DEFAULT_TTL_MS");
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL_SECS");
        env::remove_var("OTP_TTL_SECS");
        env::remove_var("OTP_COUNTRY_CODE");

        let config = Config::from_env();
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.default_ttl_ms, 60_000);
        assert_eq!(config.sweep_interval, 900);
        assert_eq!(config.otp_country_code, "91");
    }
}
