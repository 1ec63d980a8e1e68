//! Health orchestration services.

pub mod engine;
pub mod remediation;

pub use engine::HealthEngine;
pub use remediation::disable_failing;
