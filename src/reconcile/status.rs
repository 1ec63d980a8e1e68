//! Read-only comparison of canonical intent with a client's file.

use super::ReconcileError;
use crate::canonical::domain::CanonicalDocument;
use crate::client::domain::{ServerEntry, StateOrigin};
use crate::client::ports::ClientAdapter;
use camino::Utf8PathBuf;

/// How one canonical server appears in a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    /// Server name.
    pub name: String,
    /// Desired state.
    pub enabled_canonical: bool,
    /// Whether the client lists the server.
    pub present_in_client: bool,
    /// Whether the client matches canonical intent, including the entry's
    /// command, arguments, and environment when present.
    pub in_sync: bool,
}

/// Comparison of one client against the canonical document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientStatus {
    /// Client identifier.
    pub client: String,
    /// Human-readable client name.
    pub display_name: String,
    /// Whether the client appears to be installed.
    pub installed: bool,
    /// Configuration path.
    pub path: Utf8PathBuf,
    /// How the client file was read.
    pub origin: StateOrigin,
    /// One row per canonical server, in document order.
    pub servers: Vec<ServerStatus>,
    /// Client entries that no canonical server owns.
    pub unmanaged: Vec<String>,
}

impl ClientStatus {
    /// Returns rows where the client disagrees with canonical intent.
    pub fn drift(&self) -> impl Iterator<Item = &ServerStatus> {
        self.servers.iter().filter(|server| !server.in_sync)
    }

    /// Returns whether every canonical server is in sync.
    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        self.drift().next().is_none()
    }
}

/// Compares a client's current file with the canonical document.
///
/// # Errors
///
/// Returns [`ReconcileError::Adapter`] when the client cannot be located,
/// probed, or read.
pub fn client_status(
    adapter: &dyn ClientAdapter,
    document: &CanonicalDocument,
) -> Result<ClientStatus, ReconcileError> {
    let path = adapter.path()?;
    let installed = adapter.detect()?;
    let state = adapter.load()?;

    let servers = document
        .servers()
        .iter()
        .map(|server| {
            let name = server.name().to_string();
            let entry = state.servers().get(&name);
            let enabled_canonical = server.is_enabled();
            let in_sync = match entry {
                Some(value) => {
                    enabled_canonical && *value == ServerEntry::from_canonical(server).to_value()
                }
                None => !enabled_canonical,
            };
            ServerStatus {
                present_in_client: entry.is_some(),
                name,
                enabled_canonical,
                in_sync,
            }
        })
        .collect();

    let unmanaged = state
        .servers()
        .keys()
        .filter(|name| !document.contains(name))
        .cloned()
        .collect();

    Ok(ClientStatus {
        client: adapter.name().to_owned(),
        display_name: adapter.display_name().to_owned(),
        installed,
        path,
        origin: state.origin(),
        servers,
        unmanaged,
    })
}
