//! Probe verdicts and the outcome a single attempt produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The target responded as expected.
    Healthy,
    /// The target was reached but misbehaved.
    Unhealthy,
    /// The deadline or batch cancellation fired first.
    Timeout,
    /// The check itself could not run.
    Error,
}

impl CheckStatus {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }

    /// Returns whether this is [`CheckStatus::Healthy`].
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// What one probe attempt observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Verdict.
    pub status: CheckStatus,
    /// Human-readable detail.
    pub message: String,
}

impl CheckOutcome {
    /// Creates an outcome.
    #[must_use]
    pub fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a healthy outcome.
    #[must_use]
    pub fn healthy(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Healthy, message)
    }

    /// Creates an unhealthy outcome.
    #[must_use]
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Unhealthy, message)
    }

    /// Creates a timeout outcome.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Timeout, message)
    }

    /// Creates an error outcome.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Error, message)
    }
}
