//! Error types for canonical document validation.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating canonical domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalDomainError {
    /// The server name is empty after trimming.
    #[error("server name must not be empty")]
    EmptyServerName,

    /// A server with the same name already exists in the document.
    #[error("server '{0}' already exists")]
    DuplicateServer(String),

    /// No server with the given name exists in the document.
    #[error("server '{0}' not found")]
    ServerNotFound(String),

    /// The profile name is empty after trimming.
    #[error("profile name must not be empty")]
    EmptyProfileName,

    /// A profile with the same name already exists.
    #[error("profile '{0}' already exists")]
    DuplicateProfile(String),

    /// No profile with the given name exists.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// A profile could not be captured because nothing is enabled.
    #[error("no servers are currently enabled")]
    NothingEnabled,
}

impl CanonicalDomainError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ServerNotFound(_) | Self::ProfileNotFound(_) => ErrorKind::NotFound,
            Self::EmptyServerName
            | Self::DuplicateServer(_)
            | Self::EmptyProfileName
            | Self::DuplicateProfile(_)
            | Self::NothingEnabled => ErrorKind::InvalidInput,
        }
    }
}
