//! Service layer for profile management.

use crate::canonical::{
    domain::{CanonicalDocument, CanonicalDomainError, ProfileApplication},
    ports::{CanonicalStore, CanonicalStoreError},
};
use crate::error::ErrorKind;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CanonicalDomainError),
    /// Loading or saving the canonical document failed.
    #[error(transparent)]
    Store(#[from] CanonicalStoreError),
}

impl ProfileServiceError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile CRUD over a canonical store.
///
/// Every mutating call loads the document, applies one change, and saves
/// the whole document before returning.
#[derive(Clone)]
pub struct ProfileService<S>
where
    S: CanonicalStore,
{
    store: Arc<S>,
}

impl<S> ProfileService<S>
where
    S: CanonicalStore,
{
    /// Creates a profile service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists all profiles keyed by name.
    ///
    /// # Errors
    ///
    /// Returns store errors when the document cannot be loaded.
    pub fn list(&self) -> ProfileServiceResult<BTreeMap<String, Vec<String>>> {
        Ok(self.store.load()?.profiles().clone())
    }

    /// Creates a profile from explicit members.
    ///
    /// # Errors
    ///
    /// Returns domain errors for blank or duplicate names and unknown
    /// members, or store errors.
    pub fn create(&self, name: &str, members: Vec<String>) -> ProfileServiceResult<()> {
        self.mutate(|document| document.create_profile(name, members))?;
        tracing::info!(profile = name, "created profile");
        Ok(())
    }

    /// Captures the currently enabled servers as a new profile.
    ///
    /// # Errors
    ///
    /// Returns domain errors for blank or duplicate names or when nothing
    /// is enabled, or store errors.
    pub fn create_from_current(&self, name: &str) -> ProfileServiceResult<()> {
        self.mutate(|document| document.create_profile_from_current(name))?;
        tracing::info!(profile = name, "saved current servers as profile");
        Ok(())
    }

    /// Replaces the members of an existing profile.
    ///
    /// # Errors
    ///
    /// Returns domain errors for missing profiles and unknown members, or
    /// store errors.
    pub fn update(&self, name: &str, members: Vec<String>) -> ProfileServiceResult<()> {
        self.mutate(|document| document.update_profile(name, members))?;
        tracing::info!(profile = name, "updated profile");
        Ok(())
    }

    /// Deletes a profile.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::ProfileNotFound`] or store errors.
    pub fn delete(&self, name: &str) -> ProfileServiceResult<()> {
        self.mutate(|document| document.delete_profile(name).map(drop))?;
        tracing::info!(profile = name, "deleted profile");
        Ok(())
    }

    /// Applies a profile to the canonical document and saves it.
    ///
    /// Returns the saved document so the caller can reconcile clients
    /// against exactly what was persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::ProfileNotFound`] or store errors.
    pub fn apply(
        &self,
        name: &str,
    ) -> ProfileServiceResult<(CanonicalDocument, ProfileApplication)> {
        let mut document = self.store.load()?;
        let application = apply_profile_logged(&mut document, name)?;
        self.store.save(&mut document)?;
        Ok((document, application))
    }

    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut CanonicalDocument) -> Result<T, CanonicalDomainError>,
    ) -> ProfileServiceResult<T> {
        let mut document = self.store.load()?;
        let outcome = change(&mut document)?;
        self.store.save(&mut document)?;
        Ok(outcome)
    }
}

/// Applies a profile in memory and logs members that name no server.
///
/// # Errors
///
/// Returns [`CanonicalDomainError::ProfileNotFound`] when the profile does
/// not exist.
pub fn apply_profile_logged(
    document: &mut CanonicalDocument,
    name: &str,
) -> Result<ProfileApplication, CanonicalDomainError> {
    let application = document.apply_profile(name)?;
    for missing in &application.missing {
        tracing::warn!(
            profile = name,
            server = missing.as_str(),
            "profile member not found in canonical document"
        );
    }
    tracing::info!(
        profile = name,
        enabled = application.enabled.len(),
        "applied profile"
    );
    Ok(application)
}
