//! Per-invocation set of client adapters.

use crate::client::{
    adapters::{claude, cline, cursor, vscode, warp},
    domain::PlatformDirs,
    ports::ClientAdapter,
};
use crate::error::ErrorKind;
use thiserror::Error;

/// Target selector meaning every detected client.
pub const ALL_CLIENTS: &str = "all";

/// Errors returned when selecting clients.
#[derive(Debug, Error)]
pub enum ClientRegistryError {
    /// No adapter has the requested name.
    #[error("unknown client '{name}' (known: {})", known.join(", "))]
    UnknownClient {
        /// Requested name.
        name: String,
        /// Names of every registered adapter.
        known: Vec<String>,
    },
}

impl ClientRegistryError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownClient { .. } => ErrorKind::NotFound,
        }
    }
}

/// Explicitly constructed collection of client adapters.
///
/// Build a fresh registry for each invocation; nothing is cached between
/// runs.
#[derive(Default)]
pub struct ClientRegistry {
    adapters: Vec<Box<dyn ClientAdapter>>,
}

impl ClientRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every supported client, with paths rooted
    /// in `dirs`.
    #[must_use]
    pub fn standard(dirs: &PlatformDirs) -> Self {
        Self::new()
            .with_adapter(claude::adapter(dirs))
            .with_adapter(cursor::adapter(dirs))
            .with_adapter(vscode::adapter(dirs))
            .with_adapter(cline::adapter(dirs))
            .with_adapter(warp::adapter(dirs))
    }

    /// Adds an adapter.
    #[must_use]
    pub fn with_adapter(mut self, adapter: impl ClientAdapter + 'static) -> Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    /// Returns every registered adapter in registration order.
    pub fn all(&self) -> impl Iterator<Item = &dyn ClientAdapter> {
        self.adapters.iter().map(|adapter| adapter.as_ref())
    }

    /// Returns registered adapter names.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.all().map(|adapter| adapter.name().to_owned()).collect()
    }

    /// Finds an adapter by name, ignoring case.
    #[must_use]
    pub fn select(&self, name: &str) -> Option<&dyn ClientAdapter> {
        self.all()
            .find(|adapter| adapter.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Returns adapters whose client appears to be installed.
    ///
    /// Adapters that cannot locate or probe their client are skipped with a
    /// warning.
    #[must_use]
    pub fn detected(&self) -> Vec<&dyn ClientAdapter> {
        self.all()
            .filter(|adapter| match adapter.detect() {
                Ok(found) => found,
                Err(err) => {
                    tracing::warn!(client = adapter.name(), error = %err, "client detection failed");
                    false
                }
            })
            .collect()
    }

    /// Resolves a client selector into target adapters.
    ///
    /// `None` or `all` selects every detected client; anything else must
    /// name a registered adapter, which is returned whether or not it is
    /// installed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRegistryError::UnknownClient`] for unknown names.
    pub fn targets(&self, client: Option<&str>) -> Result<Vec<&dyn ClientAdapter>, ClientRegistryError> {
        match client.map(str::trim) {
            None => Ok(self.detected()),
            Some(name) if name.is_empty() || name.eq_ignore_ascii_case(ALL_CLIENTS) => {
                Ok(self.detected())
            }
            Some(name) => self.select(name).map(|adapter| vec![adapter]).ok_or_else(|| {
                ClientRegistryError::UnknownClient {
                    name: name.to_owned(),
                    known: self.names(),
                }
            }),
        }
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ClientRegistry")
            .field("adapters", &self.names())
            .finish()
    }
}
