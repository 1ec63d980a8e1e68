//! Persistence port for the canonical document.

use crate::canonical::domain::{CanonicalDocument, CanonicalDomainError};
use crate::error::ErrorKind;
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for canonical store operations.
pub type CanonicalStoreResult<T> = Result<T, CanonicalStoreError>;

/// Whole-document persistence contract.
///
/// The document is always read and written as a unit; there are no partial
/// updates. Implementations provide no locking, so callers must not share a
/// store between concurrent mutating operations.
pub trait CanonicalStore: Send + Sync {
    /// Loads the document, or an empty one when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalStoreError`] for any failure other than an absent
    /// document.
    fn load(&self) -> CanonicalStoreResult<CanonicalDocument>;

    /// Stamps `updatedAt` and writes the complete document.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalStoreError`] when the document cannot be
    /// serialised or written.
    fn save(&self, document: &mut CanonicalDocument) -> CanonicalStoreResult<()>;

    /// Describes where the document lives, for messages.
    fn location(&self) -> String;
}

/// Errors returned by canonical store implementations.
#[derive(Debug, Error)]
pub enum CanonicalStoreError {
    /// No per-user configuration directory could be determined.
    #[error("cannot determine the user configuration directory")]
    LocationUnavailable,

    /// The document exists but could not be read.
    #[error("failed to read canonical document {path}: {source}")]
    Read {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The document is not valid JSON for the canonical schema.
    #[error("failed to parse canonical document {path}: {source}")]
    Parse {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying decode failure.
        source: serde_json::Error,
    },

    /// The document parsed but violates a document invariant.
    #[error("invalid canonical document {location}: {source}")]
    Invalid {
        /// Document location.
        location: String,
        /// Violated invariant.
        source: CanonicalDomainError,
    },

    /// The document could not be serialised.
    #[error("failed to serialise canonical document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The document could not be written.
    #[error("failed to write canonical document {path}: {source}")]
    Write {
        /// Document path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Backend failure for non-file stores.
    #[error("canonical store error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl CanonicalStoreError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } | Self::Invalid { .. } => ErrorKind::InvalidInput,
            Self::LocationUnavailable => ErrorKind::UnsupportedPlatform,
            Self::Read { .. } | Self::Serialize(_) | Self::Write { .. } | Self::Backend(_) => {
                ErrorKind::IoFailure
            }
        }
    }
}
