//! HTTP GET probe.

use crate::canonical::domain::{CanonicalServer, HealthCheckSpec};
use crate::health::domain::CheckOutcome;
use crate::health::ports::{CheckContext, HealthChecker};
use async_trait::async_trait;

/// Probe for servers exposing an HTTP health endpoint.
///
/// Any 2xx status is healthy; every other status is unhealthy.
#[derive(Debug, Clone, Default)]
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    /// Creates a checker that sends requests through `client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthChecker for HttpChecker {
    async fn check(
        &self,
        _server: &CanonicalServer,
        spec: &HealthCheckSpec,
        context: &CheckContext,
    ) -> CheckOutcome {
        let Some(url) = spec.url.as_deref().filter(|url| !url.trim().is_empty()) else {
            return CheckOutcome::error("no health check URL specified");
        };

        let response = tokio::select! {
            response = self.client.get(url).send() => response,
            () = context.expired() => return CheckOutcome::timeout("HTTP request timed out"),
        };

        match response {
            Ok(response) => {
                let status = response.status();
                let message = format!("HTTP {}", status.as_u16());
                if status.is_success() {
                    CheckOutcome::healthy(message)
                } else {
                    CheckOutcome::unhealthy(message)
                }
            }
            Err(err) if err.is_timeout() => CheckOutcome::timeout("HTTP request timed out"),
            Err(err) => CheckOutcome::unhealthy(format!("HTTP request failed: {err}")),
        }
    }
}
