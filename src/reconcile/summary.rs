//! Per-client results of a multi-client run.

use super::{ApplyOutcome, ReconcileError};

/// Result for one client.
#[derive(Debug)]
pub struct ClientReport {
    /// Client identifier.
    pub client: String,
    /// Human-readable client name.
    pub display_name: String,
    /// Outcome or the error that aborted this client.
    pub result: Result<ApplyOutcome, ReconcileError>,
}

/// Best-effort results across several clients, in processing order.
#[derive(Debug, Default)]
pub struct ReconcileSummary {
    reports: Vec<ClientReport>,
}

impl ReconcileSummary {
    pub(crate) fn record(
        &mut self,
        client: &str,
        display_name: &str,
        result: Result<ApplyOutcome, ReconcileError>,
    ) {
        self.reports.push(ClientReport {
            client: client.to_owned(),
            display_name: display_name.to_owned(),
            result,
        });
    }

    /// Returns every report.
    #[must_use]
    pub fn reports(&self) -> &[ClientReport] {
        &self.reports
    }

    /// Returns the report for `client`.
    #[must_use]
    pub fn report(&self, client: &str) -> Option<&ClientReport> {
        self.reports.iter().find(|report| report.client == client)
    }

    /// Returns clients whose file was written.
    pub fn applied(&self) -> impl Iterator<Item = &ClientReport> {
        self.reports
            .iter()
            .filter(|report| matches!(report.result, Ok(ApplyOutcome::Applied { .. })))
    }

    /// Returns clients that needed no change.
    pub fn unchanged(&self) -> impl Iterator<Item = &ClientReport> {
        self.reports
            .iter()
            .filter(|report| matches!(report.result, Ok(ApplyOutcome::Unchanged)))
    }

    /// Returns clients whose change was declined.
    pub fn declined(&self) -> impl Iterator<Item = &ClientReport> {
        self.reports
            .iter()
            .filter(|report| matches!(report.result, Ok(ApplyOutcome::Declined { .. })))
    }

    /// Returns clients that failed.
    pub fn failed(&self) -> impl Iterator<Item = &ClientReport> {
        self.reports.iter().filter(|report| report.result.is_err())
    }

    /// Returns whether no client failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Returns whether no client was processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
