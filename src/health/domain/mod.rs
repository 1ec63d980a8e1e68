//! Health domain: probe types, verdicts, results, and reports.

mod kind;
mod policy;
mod report;
mod result;
mod status;

pub use kind::{HealthCheckKind, UnknownCheckKind};
pub use policy::HealthPolicy;
pub use report::{HealthReport, HealthSummary};
pub use result::{HealthCheckResult, UNKNOWN_CHECK_TYPE};
pub use status::{CheckOutcome, CheckStatus};
