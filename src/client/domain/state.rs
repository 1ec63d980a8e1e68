//! In-memory view of one client's configuration file.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// How the client state was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrigin {
    /// No configuration file exists yet.
    Missing,
    /// The file was read and parsed.
    Parsed,
    /// The file exists but could not be parsed; the state is empty and a
    /// write will replace the file.
    Unparsable,
}

/// Current configuration of one client.
///
/// `servers` holds every entry under the client's server key exactly as it
/// was read, so entries the reconciler does not own survive verbatim.
/// `settings` holds every other top-level key of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    servers: BTreeMap<String, Value>,
    settings: Map<String, Value>,
    origin: StateOrigin,
}

impl ClientState {
    /// Creates an empty state with the given origin.
    #[must_use]
    pub fn empty(origin: StateOrigin) -> Self {
        Self {
            servers: BTreeMap::new(),
            settings: Map::new(),
            origin,
        }
    }

    /// Creates a state from parsed parts.
    #[must_use]
    pub const fn new(
        servers: BTreeMap<String, Value>,
        settings: Map<String, Value>,
        origin: StateOrigin,
    ) -> Self {
        Self {
            servers,
            settings,
            origin,
        }
    }

    /// Returns the server entries keyed by name.
    #[must_use]
    pub const fn servers(&self) -> &BTreeMap<String, Value> {
        &self.servers
    }

    /// Returns the unrelated top-level settings.
    #[must_use]
    pub const fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Returns how the state was obtained.
    #[must_use]
    pub const fn origin(&self) -> StateOrigin {
        self.origin
    }

    /// Returns whether the client lists a server under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Returns a copy with the server entries replaced and settings kept.
    #[must_use]
    pub fn with_servers(&self, servers: BTreeMap<String, Value>) -> Self {
        Self {
            servers,
            settings: self.settings.clone(),
            origin: self.origin,
        }
    }
}
