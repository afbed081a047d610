//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service
//! operation.
//!
//! # Tasks
//! - Sweep: removes expired cache entries, elapsed rate-limit windows,
//!   and expired OTP records at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
