//! Aggregated view over a batch of results.

use super::{CheckStatus, HealthCheckResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts of results by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HealthSummary {
    /// Number of results.
    pub total: usize,
    /// Healthy results.
    pub healthy: usize,
    /// Unhealthy results.
    pub unhealthy: usize,
    /// Timed-out or cancelled results.
    pub timeout: usize,
    /// Checks that could not run.
    pub error: usize,
}

impl HealthSummary {
    /// Tallies `results`.
    #[must_use]
    pub fn from_results(results: &[HealthCheckResult]) -> Self {
        results.iter().fold(
            Self {
                total: results.len(),
                ..Self::default()
            },
            |mut summary, result| {
                match result.status {
                    CheckStatus::Healthy => summary.healthy += 1,
                    CheckStatus::Unhealthy => summary.unhealthy += 1,
                    CheckStatus::Timeout => summary.timeout += 1,
                    CheckStatus::Error => summary.error += 1,
                }
                summary
            },
        )
    }

    /// Returns whether any result is not healthy.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.unhealthy + self.timeout + self.error > 0
    }
}

/// Health results for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// When the report was assembled.
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
    /// Results in request order.
    pub results: Vec<HealthCheckResult>,
    /// Counts by status.
    pub summary: HealthSummary,
}

impl HealthReport {
    /// Assembles a report and its summary.
    #[must_use]
    pub fn new(generated_at: DateTime<Utc>, results: Vec<HealthCheckResult>) -> Self {
        let summary = HealthSummary::from_results(&results);
        Self {
            generated_at,
            results,
            summary,
        }
    }

    /// Results that are not healthy, in request order.
    pub fn failing(&self) -> impl Iterator<Item = &HealthCheckResult> {
        self.results.iter().filter(|result| !result.is_healthy())
    }

    /// Suggested follow-ups; empty when everything is healthy.
    #[must_use]
    pub fn recommendations(&self) -> Vec<&'static str> {
        let summary = &self.summary;
        if !summary.has_failures() {
            return Vec::new();
        }
        let mut advice = Vec::new();
        if summary.unhealthy > 0 {
            advice.push("Check server configurations and dependencies");
        }
        if summary.timeout > 0 {
            advice.push("Consider increasing health check timeouts");
        }
        if summary.error > 0 {
            advice.push("Review health check configurations");
        }
        advice.push("Use the fix option to auto-disable failing servers");
        advice
    }
}
