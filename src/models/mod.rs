//! Models Module
//!
//! Request and response DTOs for the HTTP facade.

pub mod requests;
pub mod responses;

pub use requests::{CacheSetRequest, InvalidatePatternRequest, OtpRequestBody, OtpVerifyBody};
pub use responses::{
    CacheGetResponse, CacheSetResponse, HealthResponse, InvalidateResponse, OtpRequestResponse,
    OtpVerifyResponse, StatsResponse,
};
