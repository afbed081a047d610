//! Request DTOs for the HTTP facade
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the cache SET operation (PUT /cache)
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSetRequest {
    /// The cache key
    pub key: String,
    /// The payload to cache
    pub value: Value,
    /// Optional TTL in milliseconds (uses the configured default if absent)
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl CacheSetRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for bulk invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidatePatternRequest {
    /// Wildcard pattern, `*` matching any substring
    pub pattern: String,
}

impl InvalidatePatternRequest {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.pattern.is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}

/// Request body for OTP issuance (POST /otp/request)
#[derive(Debug, Clone, Deserialize)]
pub struct OtpRequestBody {
    /// Phone number or email to send the code to
    pub destination: String,
}

impl OtpRequestBody {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.destination.trim().is_empty() {
            return Some("Destination cannot be empty".to_string());
        }
        None
    }
}

/// Request body for OTP verification (POST /otp/verify)
#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerifyBody {
    /// Phone number or email the code was issued for
    pub destination: String,
    /// The code the user submitted
    pub code: String,
}

impl OtpVerifyBody {
    /// Validates the request data.
    pub fn validate(&self) -> Option<String> {
        if self.destination.trim().is_empty() {
            return Some("Destination cannot be empty".to_string());
        }
        if self.code.trim().is_empty() {
            return Some("Code cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_set_request_deserialize() {
        let json = r#"{"key": "services:all", "value": [1, 2, 3]}"#;
        let req: CacheSetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "services:all");
        assert_eq!(req.value, json!([1, 2, 3]));
        assert!(req.ttl_ms.is_none());
    }

    #[test]
    fn test_cache_set_request_with_ttl() {
        let json = r#"{"key": "k", "value": "v", "ttl_ms": 60000}"#;
        let req: CacheSetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.ttl_ms, Some(60_000));
    }

    #[test]
    fn test_cache_set_validate_empty_key() {
        let req = CacheSetRequest {
            key: "".to_string(),
            value: json!("v"),
            ttl_ms: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_invalidate_pattern_validate() {
        let req = InvalidatePatternRequest {
            pattern: "services:*".to_string(),
        };
        assert!(req.validate().is_none());

        let req = InvalidatePatternRequest {
            pattern: "".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_otp_bodies_validate() {
        let req = OtpRequestBody {
            destination: "  ".to_string(),
        };
        assert!(req.validate().is_some());

        let req = OtpVerifyBody {
            destination: "9876543210".to_string(),
            code: "".to_string(),
        };
        assert!(req.validate().is_some());

        let req = OtpVerifyBody {
            destination: "9876543210".to_string(),
            code: "123456".to_string(),
        };
        assert!(req.validate().is_none());
    }
}
