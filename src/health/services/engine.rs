//! Retry/timeout policy and the bounded-concurrency batch runner.

use crate::canonical::domain::{CanonicalServer, HealthCheckSpec};
use crate::health::adapters::{HttpChecker, StdioChecker, TcpChecker};
use crate::health::domain::{
    CheckOutcome, HealthCheckKind, HealthCheckResult, HealthPolicy, HealthReport,
};
use crate::health::ports::{CheckContext, HealthChecker};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Longest deadline honoured for a single server.
const MAX_CHECK_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Runs health checks against canonical servers.
///
/// Each server gets one deadline covering every attempt and retry delay.
/// Batches run on the tokio runtime with at most
/// [`HealthPolicy::max_concurrency`] checks in flight, and always return
/// one result per input server in input order.
pub struct HealthEngine<C>
where
    C: Clock + Send + Sync + 'static,
{
    policy: HealthPolicy,
    clock: Arc<C>,
    stdio: Arc<dyn HealthChecker>,
    http: Arc<dyn HealthChecker>,
    tcp: Arc<dyn HealthChecker>,
}

impl<C> Clone for HealthEngine<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            clock: Arc::clone(&self.clock),
            stdio: Arc::clone(&self.stdio),
            http: Arc::clone(&self.http),
            tcp: Arc::clone(&self.tcp),
        }
    }
}

impl<C> HealthEngine<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates an engine with the built-in stdio, HTTP, and TCP probes.
    #[must_use]
    pub fn new(policy: HealthPolicy, clock: Arc<C>) -> Self {
        Self {
            policy,
            clock,
            stdio: Arc::new(StdioChecker::new(policy.stdio_grace)),
            http: Arc::new(HttpChecker::default()),
            tcp: Arc::new(TcpChecker),
        }
    }

    /// Replaces the probe used for `kind`.
    #[must_use]
    pub fn with_checker(mut self, kind: HealthCheckKind, checker: Arc<dyn HealthChecker>) -> Self {
        match kind {
            HealthCheckKind::Stdio => self.stdio = checker,
            HealthCheckKind::Http => self.http = checker,
            HealthCheckKind::Tcp => self.tcp = checker,
        }
        self
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &HealthPolicy {
        &self.policy
    }

    /// Checks one server, retrying until healthy or out of attempts.
    ///
    /// Servers without a check are probed as stdio with policy defaults.
    /// The reported status is that of the last attempt, and the duration
    /// covers the whole run including retry delays.
    pub async fn check_server(
        &self,
        server: &CanonicalServer,
        cancel: &CancellationToken,
    ) -> HealthCheckResult {
        let checked_at = self.clock.utc();
        let started = Instant::now();
        let spec = server
            .health_check()
            .cloned()
            .unwrap_or_else(|| HealthCheckSpec::new(HealthCheckKind::Stdio.as_str()));

        let outcome = match spec.check_type.parse::<HealthCheckKind>() {
            Ok(kind) => self.run_attempts(kind, server, &spec, cancel).await,
            Err(err) => CheckOutcome::error(err.to_string()),
        };

        if outcome.status.is_healthy() {
            tracing::debug!(server = %server.name(), check = %spec.check_type, "health check passed");
        } else {
            tracing::warn!(
                server = %server.name(),
                check = %spec.check_type,
                status = %outcome.status,
                message = %outcome.message,
                "health check failed"
            );
        }

        HealthCheckResult::from_outcome(
            server.name().as_str(),
            spec.check_type,
            outcome,
            started.elapsed(),
            checked_at,
        )
    }

    /// Checks every server concurrently.
    ///
    /// Cancelling `cancel` aborts in-flight checks, which kills any probe
    /// processes, and fills unfinished slots with a `timeout` result.
    /// Checks that already finished keep their own result.
    pub async fn check_servers(
        &self,
        servers: &[CanonicalServer],
        cancel: &CancellationToken,
    ) -> Vec<HealthCheckResult> {
        let permits = Arc::new(Semaphore::new(self.policy.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, server) in servers.iter().cloned().enumerate() {
            let engine = self.clone();
            let task_permits = Arc::clone(&permits);
            let token = cancel.clone();
            tasks.spawn(async move {
                let permit = tokio::select! {
                    acquired = task_permits.acquire_owned() => acquired.ok(),
                    () = token.cancelled() => None,
                };
                let Some(_permit) = permit else {
                    return (index, None);
                };
                (index, Some(engine.check_server(&server, &token).await))
            });
        }

        let mut slots: Vec<Option<HealthCheckResult>> = vec![None; servers.len()];
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::warn!(pending = tasks.len(), "health check batch cancelled");
                    tasks.abort_all();
                    while let Some(joined) = tasks.join_next().await {
                        if let Ok((index, Some(result))) = joined
                            && let Some(slot) = slots.get_mut(index)
                        {
                            *slot = Some(result);
                        }
                    }
                    break;
                }
                joined = tasks.join_next() => match joined {
                    Some(Ok((index, result))) => {
                        if let Some(slot) = slots.get_mut(index) {
                            *slot = result;
                        }
                    }
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "health check task did not complete");
                    }
                    None => break,
                },
            }
        }

        let checked_at = self.clock.utc();
        slots
            .into_iter()
            .zip(servers)
            .map(|(slot, server)| {
                slot.unwrap_or_else(|| {
                    if cancel.is_cancelled() {
                        HealthCheckResult::cancelled(server.name().as_str(), checked_at)
                    } else {
                        HealthCheckResult::from_outcome(
                            server.name().as_str(),
                            crate::health::domain::UNKNOWN_CHECK_TYPE,
                            CheckOutcome::error("health check task did not complete"),
                            Duration::ZERO,
                            checked_at,
                        )
                    }
                })
            })
            .collect()
    }

    /// Checks every server and wraps the results in a report.
    pub async fn report(
        &self,
        servers: &[CanonicalServer],
        cancel: &CancellationToken,
    ) -> HealthReport {
        let results = self.check_servers(servers, cancel).await;
        HealthReport::new(self.clock.utc(), results)
    }

    async fn run_attempts(
        &self,
        kind: HealthCheckKind,
        server: &CanonicalServer,
        spec: &HealthCheckSpec,
        cancel: &CancellationToken,
    ) -> CheckOutcome {
        let checker = self.checker(kind);
        let attempts = self.policy.attempts_for(spec.retries);
        let timeout = self.policy.timeout_for(spec.timeout_ms).min(MAX_CHECK_TIMEOUT);
        let context = CheckContext::new(Instant::now() + timeout, cancel.clone());

        let mut outcome = checker.check(server, spec, &context).await;
        let mut attempt: u32 = 1;
        while !outcome.status.is_healthy() && attempt < attempts {
            tracing::debug!(
                server = %server.name(),
                attempt,
                attempts,
                status = %outcome.status,
                "retrying health check"
            );
            tokio::select! {
                () = context.expired() => {
                    return CheckOutcome::timeout("health check timed out during retries");
                }
                () = tokio::time::sleep(self.policy.retry_delay) => {}
            }
            attempt += 1;
            outcome = checker.check(server, spec, &context).await;
        }
        outcome
    }

    fn checker(&self, kind: HealthCheckKind) -> &dyn HealthChecker {
        match kind {
            HealthCheckKind::Stdio => self.stdio.as_ref(),
            HealthCheckKind::Http => self.http.as_ref(),
            HealthCheckKind::Tcp => self.tcp.as_ref(),
        }
    }
}
