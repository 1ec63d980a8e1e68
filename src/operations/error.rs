//! Errors surfaced by the command surface.

use crate::canonical::domain::CanonicalDomainError;
use crate::canonical::ports::CanonicalStoreError;
use crate::canonical::services::ProfileServiceError;
use crate::client::services::ClientRegistryError;
use crate::error::ErrorKind;
use crate::reconcile::ReconcileError;
use crate::resolver::ResolveError;
use thiserror::Error;

/// Result type for [`Switchboard`](super::Switchboard) operations.
pub type OperationResult<T> = Result<T, OperationError>;

/// Failure of a whole operation.
///
/// Per-client reconcile failures are not errors at this level; they are
/// reported in the operation's summary.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The canonical document could not be loaded or saved.
    #[error(transparent)]
    Store(#[from] CanonicalStoreError),

    /// A canonical mutation was rejected.
    #[error(transparent)]
    Domain(#[from] CanonicalDomainError),

    /// A profile operation failed.
    #[error(transparent)]
    Profile(#[from] ProfileServiceError),

    /// The query could not be resolved to one server.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The requested client is unknown.
    #[error(transparent)]
    Clients(#[from] ClientRegistryError),

    /// A single-client operation failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// No client was named and none is installed.
    #[error("no clients detected or specified")]
    NoClients,

    /// Nothing matched the health check selection.
    #[error("no servers found matching criteria")]
    NoServers,
}

impl OperationError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(err) => err.kind(),
            Self::Domain(err) => err.kind(),
            Self::Profile(err) => err.kind(),
            Self::Resolve(err) => err.kind(),
            Self::Clients(err) => err.kind(),
            Self::Reconcile(err) => err.kind(),
            Self::NoClients | Self::NoServers => ErrorKind::NotFound,
        }
    }
}
