//! TCP connect probe.

use crate::canonical::domain::{CanonicalServer, HealthCheckSpec};
use crate::health::domain::CheckOutcome;
use crate::health::ports::{CheckContext, HealthChecker};
use async_trait::async_trait;
use tokio::net::TcpStream;

const TCP_SCHEME: &str = "tcp://";

/// Probe that only checks a listener accepts connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpChecker;

/// Strips an optional `tcp://` prefix from a check address.
#[must_use]
pub fn tcp_address(url: &str) -> &str {
    url.strip_prefix(TCP_SCHEME).unwrap_or(url)
}

#[async_trait]
impl HealthChecker for TcpChecker {
    async fn check(
        &self,
        _server: &CanonicalServer,
        spec: &HealthCheckSpec,
        context: &CheckContext,
    ) -> CheckOutcome {
        let Some(address) = spec
            .url
            .as_deref()
            .map(tcp_address)
            .filter(|address| !address.trim().is_empty())
        else {
            return CheckOutcome::error("no TCP address specified in health check URL");
        };

        tokio::select! {
            connected = TcpStream::connect(address) => match connected {
                Ok(_stream) => CheckOutcome::healthy("TCP connection successful"),
                Err(err) => CheckOutcome::unhealthy(format!("TCP connection failed: {err}")),
            },
            () = context.expired() => CheckOutcome::timeout("TCP connection timed out"),
        }
    }
}
