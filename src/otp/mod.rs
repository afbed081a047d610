//! OTP Module
//!
//! One-time-passcode issuance and verification keyed by normalized
//! phone number or email. Records are ephemeral, single-use, and swept
//! on expiry.

mod normalize;
mod store;

pub use normalize::normalize;
pub use store::{OtpRecord, OtpStore};

use thiserror::Error;

// == OTP Error Enum ==
/// Distinct outcomes of a failed verification, so the caller can tell
/// "never requested" from "too late" from "wrong code".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// No outstanding code for this destination
    #[error("No verification code was requested for this destination")]
    NotFound,

    /// The code expired before verification
    #[error("The verification code has expired, request a new one")]
    Expired,

    /// The supplied code does not match
    #[error("The verification code is incorrect")]
    Mismatch,
}
