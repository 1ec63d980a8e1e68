//! JSON file store for the canonical document.

use crate::canonical::{
    domain::CanonicalDocument,
    ports::{CanonicalStore, CanonicalStoreError, CanonicalStoreResult},
};
use crate::fs_utils;
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;

const APP_DIR: &str = "switchboard";
const DOCUMENT_FILE: &str = "canonical.json";

/// Canonical store backed by a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileCanonicalStore<C>
where
    C: Clock + Send + Sync,
{
    path: Utf8PathBuf,
    clock: Arc<C>,
}

impl<C> JsonFileCanonicalStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store for an explicit document path.
    #[must_use]
    pub const fn new(path: Utf8PathBuf, clock: Arc<C>) -> Self {
        Self { path, clock }
    }

    /// Creates a store at `<user config dir>/switchboard/canonical.json`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalStoreError::LocationUnavailable`] when the user
    /// configuration directory is unknown or not valid UTF-8.
    pub fn at_default_location(clock: Arc<C>) -> CanonicalStoreResult<Self> {
        Ok(Self::new(default_document_path()?, clock))
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Returns the default canonical document path for the current user.
///
/// # Errors
///
/// Returns [`CanonicalStoreError::LocationUnavailable`] when the user
/// configuration directory is unknown or not valid UTF-8.
pub fn default_document_path() -> CanonicalStoreResult<Utf8PathBuf> {
    let native = dirs::config_dir().ok_or(CanonicalStoreError::LocationUnavailable)?;
    let config_dir =
        Utf8PathBuf::from_path_buf(native).map_err(|_| CanonicalStoreError::LocationUnavailable)?;
    Ok(config_dir.join(APP_DIR).join(DOCUMENT_FILE))
}

impl<C> CanonicalStore for JsonFileCanonicalStore<C>
where
    C: Clock + Send + Sync,
{
    fn load(&self) -> CanonicalStoreResult<CanonicalDocument> {
        let contents =
            fs_utils::read_optional(&self.path).map_err(|source| CanonicalStoreError::Read {
                path: self.path.clone(),
                source,
            })?;

        let Some(raw) = contents else {
            tracing::debug!(path = %self.path, "canonical document absent; starting empty");
            return Ok(CanonicalDocument::empty(self.clock.utc()));
        };

        let document: CanonicalDocument =
            serde_json::from_str(&raw).map_err(|source| CanonicalStoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        document
            .validate()
            .map_err(|source| CanonicalStoreError::Invalid {
                location: self.path.to_string(),
                source,
            })?;
        Ok(document)
    }

    fn save(&self, document: &mut CanonicalDocument) -> CanonicalStoreResult<()> {
        document.touch(self.clock.utc());
        let mut rendered = serde_json::to_string_pretty(document)?;
        rendered.push('\n');
        fs_utils::write_creating_parent(&self.path, &rendered).map_err(|source| {
            CanonicalStoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::info!(
            path = %self.path,
            servers = document.servers().len(),
            "saved canonical document"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.to_string()
    }
}
