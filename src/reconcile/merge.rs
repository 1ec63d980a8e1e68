//! Computes a client's new server map from its current one and the
//! canonical document.

use crate::canonical::domain::CanonicalDocument;
use crate::client::domain::{ClientState, ServerEntry};
use serde_json::Value;
use std::collections::BTreeMap;

/// Merges canonical intent into a client's current server entries.
///
/// The result holds every current entry whose name is not a canonical
/// server, untouched, plus one entry per enabled canonical server rendered
/// from the canonical definition. Canonical servers that are disabled are
/// absent from the result even when the client lists them.
///
/// The output map is ordered by name, so equal inputs always serialise to
/// identical bytes, and merging an already merged map changes nothing.
#[must_use]
pub fn merge_servers(
    current: &BTreeMap<String, Value>,
    document: &CanonicalDocument,
) -> BTreeMap<String, Value> {
    let mut merged: BTreeMap<String, Value> = current
        .iter()
        .filter(|(name, _)| !document.contains(name))
        .map(|(name, entry)| (name.clone(), entry.clone()))
        .collect();

    for server in document.enabled_servers() {
        merged.insert(
            server.name().to_string(),
            ServerEntry::from_canonical(server).to_value(),
        );
    }
    merged
}

/// Applies [`merge_servers`] to a whole client state, keeping its settings.
#[must_use]
pub fn merge_state(current: &ClientState, document: &CanonicalDocument) -> ClientState {
    current.with_servers(merge_servers(current.servers(), document))
}
