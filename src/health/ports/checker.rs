//! Probe contract implemented once per check type.

use crate::canonical::domain::{CanonicalServer, HealthCheckSpec};
use crate::health::domain::CheckOutcome;
use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation shared by every attempt for one server.
#[derive(Debug, Clone)]
pub struct CheckContext {
    deadline: Instant,
    cancel: CancellationToken,
}

impl CheckContext {
    /// Creates a context that expires at `deadline` or when `cancel` fires.
    #[must_use]
    pub const fn new(deadline: Instant, cancel: CancellationToken) -> Self {
        Self { deadline, cancel }
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns whether the deadline has passed or the batch was cancelled.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.cancel.is_cancelled() || Instant::now() >= self.deadline
    }

    /// Completes when the deadline passes or the batch is cancelled,
    /// whichever comes first.
    pub async fn expired(&self) {
        tokio::select! {
            () = tokio::time::sleep_until(self.deadline) => {}
            () = self.cancel.cancelled() => {}
        }
    }
}

/// One probe type.
///
/// Checkers report target failures as outcomes; they never return errors.
/// Every await must yield to [`CheckContext::expired`].
#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// Runs a single attempt against `server` using `spec`.
    async fn check(
        &self,
        server: &CanonicalServer,
        spec: &HealthCheckSpec,
        context: &CheckContext,
    ) -> CheckOutcome;
}
