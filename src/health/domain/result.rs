//! Per-server health check result.

use super::{CheckOutcome, CheckStatus};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Check type reported for slots that never ran.
pub const UNKNOWN_CHECK_TYPE: &str = "unknown";

/// Final verdict for one server after all attempts.
///
/// Results are reported to the caller and never written back into the
/// canonical document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResult {
    /// Canonical server name.
    pub server_name: String,
    /// Check type as configured, or `unknown` for cancelled slots.
    #[serde(rename = "type")]
    pub check_type: String,
    /// Verdict of the last attempt.
    pub status: CheckStatus,
    /// Detail of the last attempt.
    pub message: String,
    /// Wall time spent across every attempt and retry delay.
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    /// When the check started.
    #[serde(rename = "timestamp")]
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    /// Builds a result from an attempt outcome.
    #[must_use]
    pub fn from_outcome(
        server_name: impl Into<String>,
        check_type: impl Into<String>,
        outcome: CheckOutcome,
        duration: Duration,
        checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            check_type: check_type.into(),
            status: outcome.status,
            message: outcome.message,
            duration,
            checked_at,
        }
    }

    /// Placeholder for a server whose check was cancelled before it
    /// reported.
    #[must_use]
    pub fn cancelled(server_name: impl Into<String>, checked_at: DateTime<Utc>) -> Self {
        Self::from_outcome(
            server_name,
            UNKNOWN_CHECK_TYPE,
            CheckOutcome::timeout("health check cancelled"),
            Duration::ZERO,
            checked_at,
        )
    }

    /// Returns whether the server passed.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
