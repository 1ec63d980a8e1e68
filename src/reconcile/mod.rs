//! Reconciliation of canonical intent into client configuration files.
//!
//! [`merge_servers`] computes the new server map; [`Reconciler`] wraps it
//! in the write safety net: render both versions, diff, ask an
//! [`ApprovalGate`], back up, then write. [`client_status`] is the
//! read-only counterpart used for drift reports.

mod approval;
mod diff;
mod error;
mod merge;
mod reconciler;
mod status;
mod summary;

pub use approval::{
    ApprovalError, ApprovalGate, ApprovalRequest, AutoApprove, DenyAll, PromptApproval,
};
pub use diff::{ConfigDiff, DEFAULT_CONTEXT, DiffKind, DiffLine};
pub use error::ReconcileError;
pub use merge::{merge_servers, merge_state};
pub use reconciler::{ApplyOutcome, ReconcilePlan, Reconciler, restore_backup};
pub use status::{ClientStatus, ServerStatus, client_status};
pub use summary::{ClientReport, ReconcileSummary};

#[cfg(test)]
mod tests;
