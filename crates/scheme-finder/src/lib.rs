//! Eligibility matching and application-deadline tracking for government welfare schemes.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
