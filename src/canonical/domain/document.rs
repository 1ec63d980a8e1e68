//! Canonical document aggregate: servers, profiles, and metadata.

use super::{CanonicalDomainError, CanonicalServer, ServerName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Schema version written into new documents.
pub const DOCUMENT_VERSION: &str = "1";

/// Document bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Schema version tag.
    pub version: String,
    /// Time of the last successful save.
    pub updated_at: DateTime<Utc>,
}

/// Outcome of applying a profile to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileApplication {
    /// Servers enabled by the profile, in profile order.
    pub enabled: Vec<ServerName>,
    /// Profile members that do not name an existing server.
    pub missing: Vec<String>,
}

/// The single source of truth for server definitions and desired state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    servers: Vec<CanonicalServer>,
    #[serde(default, deserialize_with = "null_as_default")]
    profiles: BTreeMap<String, Vec<String>>,
    meta: DocumentMeta,
}

impl CanonicalDocument {
    /// Creates an empty document stamped with `now`.
    #[must_use]
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            servers: Vec::new(),
            profiles: BTreeMap::new(),
            meta: DocumentMeta {
                version: DOCUMENT_VERSION.to_owned(),
                updated_at: now,
            },
        }
    }

    /// Checks document-wide invariants after deserialisation.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::DuplicateServer`] when two servers
    /// share a name.
    pub fn validate(&self) -> Result<(), CanonicalDomainError> {
        let mut seen = BTreeSet::new();
        for server in &self.servers {
            if !seen.insert(server.name().as_str()) {
                return Err(CanonicalDomainError::DuplicateServer(
                    server.name().to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Returns all servers in document order.
    #[must_use]
    pub fn servers(&self) -> &[CanonicalServer] {
        &self.servers
    }

    /// Returns the metadata block.
    #[must_use]
    pub const fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    /// Stamps the document with a new update time.
    pub const fn touch(&mut self, now: DateTime<Utc>) {
        self.meta.updated_at = now;
    }

    /// Finds a server by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CanonicalServer> {
        self.servers.iter().find(|server| server.name() == name)
    }

    /// Finds a server by exact name for mutation.
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut CanonicalServer> {
        self.servers.iter_mut().find(|server| server.name() == name)
    }

    /// Returns whether a server with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Returns the names of all enabled servers.
    #[must_use]
    pub fn enabled_set(&self) -> BTreeSet<&str> {
        self.enabled_servers()
            .map(|server| server.name().as_str())
            .collect()
    }

    /// Returns enabled servers in document order.
    pub fn enabled_servers(&self) -> impl Iterator<Item = &CanonicalServer> {
        self.servers.iter().filter(|server| server.is_enabled())
    }

    /// Adds a new server.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::DuplicateServer`] when the name is
    /// already taken.
    pub fn add_server(&mut self, server: CanonicalServer) -> Result<(), CanonicalDomainError> {
        if self.contains(server.name().as_str()) {
            return Err(CanonicalDomainError::DuplicateServer(
                server.name().to_string(),
            ));
        }
        self.servers.push(server);
        Ok(())
    }

    /// Removes a server by name and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::ServerNotFound`] when no server has
    /// the name.
    pub fn remove_server(&mut self, name: &str) -> Result<CanonicalServer, CanonicalDomainError> {
        let position = self
            .servers
            .iter()
            .position(|server| server.name() == name)
            .ok_or_else(|| CanonicalDomainError::ServerNotFound(name.to_owned()))?;
        Ok(self.servers.remove(position))
    }

    /// Sets the enabled flag of a named server.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::ServerNotFound`] when no server has
    /// the name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), CanonicalDomainError> {
        let server = self
            .find_by_name_mut(name)
            .ok_or_else(|| CanonicalDomainError::ServerNotFound(name.to_owned()))?;
        server.set_enabled(enabled);
        Ok(())
    }

    /// Returns all profiles keyed by name.
    #[must_use]
    pub const fn profiles(&self) -> &BTreeMap<String, Vec<String>> {
        &self.profiles
    }

    /// Returns the members of a profile.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&[String]> {
        self.profiles.get(name).map(Vec::as_slice)
    }

    /// Creates a profile from explicit members.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank or taken, or when a member does not
    /// name an existing server.
    pub fn create_profile(
        &mut self,
        name: &str,
        members: Vec<String>,
    ) -> Result<(), CanonicalDomainError> {
        let profile_name = normalize_profile_name(name)?;
        if self.profiles.contains_key(&profile_name) {
            return Err(CanonicalDomainError::DuplicateProfile(profile_name));
        }
        self.ensure_members_exist(&members)?;
        self.profiles.insert(profile_name, members);
        Ok(())
    }

    /// Captures the currently enabled servers as a new profile.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank or taken, or when no server is
    /// enabled.
    pub fn create_profile_from_current(&mut self, name: &str) -> Result<(), CanonicalDomainError> {
        let profile_name = normalize_profile_name(name)?;
        if self.profiles.contains_key(&profile_name) {
            return Err(CanonicalDomainError::DuplicateProfile(profile_name));
        }
        let members: Vec<String> = self
            .enabled_servers()
            .map(|server| server.name().to_string())
            .collect();
        if members.is_empty() {
            return Err(CanonicalDomainError::NothingEnabled);
        }
        self.profiles.insert(profile_name, members);
        Ok(())
    }

    /// Replaces the members of an existing profile.
    ///
    /// # Errors
    ///
    /// Fails when the profile is missing or a member does not name an
    /// existing server.
    pub fn update_profile(
        &mut self,
        name: &str,
        members: Vec<String>,
    ) -> Result<(), CanonicalDomainError> {
        if !self.profiles.contains_key(name) {
            return Err(CanonicalDomainError::ProfileNotFound(name.to_owned()));
        }
        self.ensure_members_exist(&members)?;
        self.profiles.insert(name.to_owned(), members);
        Ok(())
    }

    /// Deletes a profile.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::ProfileNotFound`] when the profile
    /// does not exist.
    pub fn delete_profile(&mut self, name: &str) -> Result<Vec<String>, CanonicalDomainError> {
        self.profiles
            .remove(name)
            .ok_or_else(|| CanonicalDomainError::ProfileNotFound(name.to_owned()))
    }

    /// Disables every server, then enables the profile's members.
    ///
    /// Members that name no server are reported, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalDomainError::ProfileNotFound`] when the profile
    /// does not exist; the document is left untouched in that case.
    pub fn apply_profile(&mut self, name: &str) -> Result<ProfileApplication, CanonicalDomainError> {
        let members = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| CanonicalDomainError::ProfileNotFound(name.to_owned()))?;

        for server in &mut self.servers {
            server.set_enabled(false);
        }

        let mut application = ProfileApplication::default();
        for member in members {
            match self.find_by_name_mut(&member) {
                Some(server) => {
                    server.set_enabled(true);
                    application.enabled.push(server.name().clone());
                }
                None => application.missing.push(member),
            }
        }
        Ok(application)
    }

    fn ensure_members_exist(&self, members: &[String]) -> Result<(), CanonicalDomainError> {
        match members.iter().find(|member| !self.contains(member)) {
            Some(missing) => Err(CanonicalDomainError::ServerNotFound(missing.clone())),
            None => Ok(()),
        }
    }
}

fn normalize_profile_name(name: &str) -> Result<String, CanonicalDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CanonicalDomainError::EmptyProfileName);
    }
    Ok(trimmed.to_owned())
}

/// Documents written by older tooling carry `null` for empty collections.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
