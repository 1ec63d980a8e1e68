//! Port contracts for health probes.

pub mod checker;

pub use checker::{CheckContext, HealthChecker};
