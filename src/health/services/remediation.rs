//! Explicit auto-disable of servers that failed their checks.

use crate::canonical::domain::{CanonicalDocument, ServerName};
use crate::health::domain::HealthCheckResult;

/// Disables every enabled server whose result is not healthy.
///
/// Only the in-memory document changes; saving it and reconciling clients
/// are separate steps. Returns the servers that were flipped, in result
/// order.
pub fn disable_failing(
    document: &mut CanonicalDocument,
    results: &[HealthCheckResult],
) -> Vec<ServerName> {
    let mut disabled = Vec::new();
    for result in results.iter().filter(|result| !result.is_healthy()) {
        let Some(server) = document.find_by_name_mut(&result.server_name) else {
            continue;
        };
        if !server.is_enabled() {
            continue;
        }
        server.set_enabled(false);
        tracing::info!(
            server = %server.name(),
            status = %result.status,
            "disabled failing server"
        );
        disabled.push(server.name().clone());
    }
    disabled
}
