//! Launches the server command and watches it for a grace period.

use crate::canonical::domain::{CanonicalServer, HealthCheckSpec};
use crate::health::domain::CheckOutcome;
use crate::health::ports::{CheckContext, HealthChecker};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};

/// Grace period used when none is configured.
pub const DEFAULT_STDIO_GRACE: Duration = Duration::from_secs(1);

/// Probe for stdio servers.
///
/// A process that exits non-zero within the grace period is unhealthy. One
/// that exits zero, or is still running when the grace period ends, is
/// healthy. Surviving processes are killed before the outcome is returned,
/// and dropping an in-flight check kills the child as well.
#[derive(Debug, Clone, Copy)]
pub struct StdioChecker {
    grace: Duration,
}

impl StdioChecker {
    /// Creates a checker with the given grace period.
    #[must_use]
    pub const fn new(grace: Duration) -> Self {
        Self { grace }
    }

    /// Returns the grace period.
    #[must_use]
    pub const fn grace(&self) -> Duration {
        self.grace
    }
}

impl Default for StdioChecker {
    fn default() -> Self {
        Self::new(DEFAULT_STDIO_GRACE)
    }
}

enum Watch {
    Exited(std::io::Result<ExitStatus>),
    StillRunning,
    Expired,
}

#[async_trait]
impl HealthChecker for StdioChecker {
    async fn check(
        &self,
        server: &CanonicalServer,
        _spec: &HealthCheckSpec,
        context: &CheckContext,
    ) -> CheckOutcome {
        if server.command().trim().is_empty() {
            return CheckOutcome::error("no command specified");
        }

        let mut child = match Command::new(server.command())
            .args(server.args())
            .envs(server.env())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(err) => return CheckOutcome::error(format!("failed to start command: {err}")),
        };

        let watch = tokio::select! {
            status = child.wait() => Watch::Exited(status),
            () = tokio::time::sleep(self.grace) => Watch::StillRunning,
            () = context.expired() => Watch::Expired,
        };

        match watch {
            Watch::Exited(Ok(status)) if status.success() => {
                CheckOutcome::healthy("command completed successfully")
            }
            Watch::Exited(Ok(status)) => {
                CheckOutcome::unhealthy(format!("command exited with error: {status}"))
            }
            Watch::Exited(Err(err)) => {
                CheckOutcome::unhealthy(format!("command exited with error: {err}"))
            }
            Watch::StillRunning => {
                stop(server, &mut child).await;
                CheckOutcome::healthy("command started successfully")
            }
            Watch::Expired => {
                stop(server, &mut child).await;
                CheckOutcome::timeout("health check timed out")
            }
        }
    }
}

async fn stop(server: &CanonicalServer, child: &mut Child) {
    if let Err(err) = child.kill().await {
        tracing::debug!(server = %server.name(), error = %err, "failed to stop probed process");
    }
}
