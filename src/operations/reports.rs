//! Values returned by the command surface.

use crate::canonical::domain::{ProfileApplication, ServerName};
use crate::health::domain::HealthReport;
use crate::reconcile::ReconcileSummary;
use std::fmt;

/// Desired-state change requested by enable, disable, or toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    /// Mark the server enabled.
    Enable,
    /// Mark the server disabled.
    Disable,
    /// Invert the current flag.
    Toggle,
}

impl ToggleMode {
    /// Returns the new flag given the current one.
    #[must_use]
    pub const fn apply(self, current: bool) -> bool {
        match self {
            Self::Enable => true,
            Self::Disable => false,
            Self::Toggle => !current,
        }
    }
}

impl fmt::Display for ToggleMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Toggle => "toggle",
        })
    }
}

/// Outcome of enable, disable, or toggle.
#[derive(Debug)]
pub struct ToggleReport {
    /// Server the query resolved to.
    pub server: ServerName,
    /// Flag after the change.
    pub enabled: bool,
    /// Whether the canonical flag actually changed.
    pub changed: bool,
    /// Per-client reconcile results.
    pub reconcile: ReconcileSummary,
}

/// Outcome of an apply.
#[derive(Debug)]
pub struct ApplyReport {
    /// Profile application, when a profile was requested.
    pub profile: Option<ProfileApplication>,
    /// Per-client reconcile results.
    pub reconcile: ReconcileSummary,
}

/// Outcome of a health run.
#[derive(Debug)]
pub struct HealthRun {
    /// Results and summary.
    pub report: HealthReport,
    /// Servers disabled and saved by the fix option.
    ///
    /// Clients keep their old entries until the next apply.
    pub disabled: Vec<ServerName>,
}

impl HealthRun {
    /// Returns whether an apply is needed to push fixes to clients.
    #[must_use]
    pub fn needs_apply(&self) -> bool {
        !self.disabled.is_empty()
    }
}
