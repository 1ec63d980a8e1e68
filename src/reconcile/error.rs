//! Reconciliation errors.

use super::ApprovalError;
use crate::client::ports::ClientAdapterError;
use crate::error::ErrorKind;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that abort reconciliation of one client.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Locating, reading, or rendering the client file failed.
    #[error(transparent)]
    Adapter(#[from] ClientAdapterError),

    /// Approval could not be obtained.
    #[error("approval for {client} failed: {source}")]
    Approval {
        /// Client identifier.
        client: String,
        /// Prompt failure.
        source: ApprovalError,
    },

    /// The backup failed, so nothing was written.
    #[error("backup of {client} failed; configuration left unchanged: {source}")]
    Backup {
        /// Client identifier.
        client: String,
        /// Copy failure.
        source: ClientAdapterError,
    },

    /// The write failed after the backup was taken.
    #[error("{}", write_failure_message(.client, .backup.as_ref(), .source))]
    Write {
        /// Client identifier.
        client: String,
        /// Backup left on disk, if one was taken.
        backup: Option<Utf8PathBuf>,
        /// Write failure.
        source: ClientAdapterError,
    },
}

impl ReconcileError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Adapter(source) | Self::Backup { source, .. } | Self::Write { source, .. } => {
                source.kind()
            }
            Self::Approval { .. } => ErrorKind::IoFailure,
        }
    }
}

fn write_failure_message(
    client: &str,
    backup: Option<&Utf8PathBuf>,
    source: &ClientAdapterError,
) -> String {
    match backup {
        Some(path) => format!("{source}; backup of {client} kept at {path}"),
        None => format!("{source}; {client} had no previous file to back up"),
    }
}
