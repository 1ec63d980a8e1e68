//! In-memory canonical store.

use crate::canonical::{
    domain::CanonicalDocument,
    ports::{CanonicalStore, CanonicalStoreError, CanonicalStoreResult},
};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory canonical store.
///
/// Holds at most one document; `load` returns an empty document until the
/// first `save`.
#[derive(Debug, Clone)]
pub struct InMemoryCanonicalStore<C>
where
    C: Clock + Send + Sync,
{
    document: Arc<RwLock<Option<CanonicalDocument>>>,
    clock: Arc<C>,
}

impl<C> InMemoryCanonicalStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            document: Arc::new(RwLock::new(None)),
            clock,
        }
    }

    /// Creates a store pre-seeded with `document`.
    #[must_use]
    pub fn with_document(document: CanonicalDocument, clock: Arc<C>) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document))),
            clock,
        }
    }

    /// Returns the last saved document, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalStoreError::Backend`] when lock acquisition fails.
    pub fn snapshot(&self) -> CanonicalStoreResult<Option<CanonicalDocument>> {
        let guard = self.document.read().map_err(|err| {
            CanonicalStoreError::backend(std::io::Error::other(err.to_string()))
        })?;
        Ok(guard.clone())
    }
}

impl<C> CanonicalStore for InMemoryCanonicalStore<C>
where
    C: Clock + Send + Sync,
{
    fn load(&self) -> CanonicalStoreResult<CanonicalDocument> {
        Ok(self
            .snapshot()?
            .unwrap_or_else(|| CanonicalDocument::empty(self.clock.utc())))
    }

    fn save(&self, document: &mut CanonicalDocument) -> CanonicalStoreResult<()> {
        document
            .validate()
            .map_err(|source| CanonicalStoreError::Invalid {
                location: self.location(),
                source,
            })?;
        document.touch(self.clock.utc());
        let mut guard = self.document.write().map_err(|err| {
            CanonicalStoreError::backend(std::io::Error::other(err.to_string()))
        })?;
        *guard = Some(document.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
