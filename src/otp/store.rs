//! OTP Store Module
//!
//! In-memory one-time-passcode records keyed by normalized phone
//! number or email. Codes live in plain process memory with no
//! persistence: a restart invalidates everything outstanding, which is
//! acceptable because codes are short-lived and single-use.

use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;
use tracing::{debug, warn};

use crate::cache::now_ms;
use crate::otp::{normalize, OtpError};

// == OTP Record ==
/// One outstanding code for a normalized destination.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    /// The one-time code
    pub code: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Failed verification attempts against this record
    pub attempts: u32,
}

impl OtpRecord {
    /// True once the record's expiry has passed.
    pub fn is_expired(&self) -> bool {
        now_ms() > self.expires_at
    }
}

// == OTP Store ==
/// Ephemeral secret store for one-time passcodes.
///
/// Every operation normalizes its key, so a code requested as
/// `98765 43210` verifies against `+919876543210`.
#[derive(Debug)]
pub struct OtpStore {
    records: Mutex<HashMap<String, OtpRecord>>,
    /// Country code applied to bare 10-digit phone numbers
    country_code: String,
}

impl OtpStore {
    // == Constructor ==
    /// Creates an empty store using `country_code` for normalization.
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            country_code: country_code.into(),
        }
    }

    // == Set ==
    /// Stores a code for `key`, overwriting any prior record for the
    /// same normalized destination.
    pub fn set(&self, key: &str, code: impl Into<String>, expires_at: u64) {
        let normalized = normalize(key, &self.country_code);
        let Ok(mut records) = self.records.lock() else {
            warn!("otp store poisoned, dropping set");
            return;
        };
        records.insert(
            normalized,
            OtpRecord {
                code: code.into(),
                expires_at,
                attempts: 0,
            },
        );
    }

    // == Issue ==
    /// Generates a fresh 6-digit code for `key`, valid for `ttl_ms`,
    /// and stores it. Returns the code for out-of-band delivery.
    pub fn issue(&self, key: &str, ttl_ms: u64) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.set(key, code.clone(), now_ms() + ttl_ms);
        code
    }

    // == Get ==
    /// Raw lookup by normalized key.
    ///
    /// Returns the record even when expired so callers can tell
    /// "expired" apart from "never requested"; only `verify` decides
    /// validity.
    pub fn get(&self, key: &str) -> Option<OtpRecord> {
        let normalized = normalize(key, &self.country_code);
        let records = self.records.lock().ok()?;
        records.get(&normalized).cloned()
    }

    // == Delete ==
    /// Removes the record for `key`. Returns true if one existed.
    pub fn delete(&self, key: &str) -> bool {
        let normalized = normalize(key, &self.country_code);
        let Ok(mut records) = self.records.lock() else {
            warn!("otp store poisoned, dropping delete");
            return false;
        };
        records.remove(&normalized).is_some()
    }

    // == Verify ==
    /// Runs the verification protocol for `key` against `code`.
    ///
    /// - No record ⇒ `NotFound`.
    /// - Expired record ⇒ deleted, `Expired`.
    /// - Wrong code ⇒ record retained, attempt counted, `Mismatch`.
    /// - Match ⇒ record deleted (single use), `Ok`.
    pub fn verify(&self, key: &str, code: &str) -> Result<(), OtpError> {
        let normalized = normalize(key, &self.country_code);
        let Ok(mut records) = self.records.lock() else {
            warn!("otp store poisoned, failing verification");
            return Err(OtpError::NotFound);
        };

        let record = records.get_mut(&normalized).ok_or(OtpError::NotFound)?;

        if record.is_expired() {
            records.remove(&normalized);
            return Err(OtpError::Expired);
        }

        if record.code != code {
            record.attempts += 1;
            debug!(attempts = record.attempts, "otp mismatch");
            return Err(OtpError::Mismatch);
        }

        records.remove(&normalized);
        Ok(())
    }

    // == Cleanup ==
    /// Removes all expired records, returning the number removed.
    pub fn cleanup(&self) -> usize {
        let Ok(mut records) = self.records.lock() else {
            warn!("otp store poisoned, skipping cleanup");
            return 0;
        };
        let before = records.len();
        records.retain(|_, record| !record.is_expired());
        before - records.len()
    }

    // == Length ==
    /// Number of outstanding records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
