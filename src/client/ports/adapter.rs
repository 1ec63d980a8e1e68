//! Capability set shared by every supported client.

use crate::client::domain::{ClientPathError, ClientState};
use crate::error::ErrorKind;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};
use thiserror::Error;

/// Result type for client adapter operations.
pub type ClientAdapterResult<T> = Result<T, ClientAdapterError>;

/// Uniform access to one client application's configuration file.
///
/// Adapters never merge or decide anything: the reconciler drives them
/// through load, render, backup, and write so that every client gets the
/// same safety net.
pub trait ClientAdapter: Send + Sync {
    /// Short identifier used on the command line, such as `vscode`.
    fn name(&self) -> &str;

    /// Human-readable client name.
    fn display_name(&self) -> &str;

    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientAdapterError::Path`] when the location cannot be
    /// computed on this machine.
    fn path(&self) -> ClientAdapterResult<Utf8PathBuf>;

    /// Returns whether the client appears to be installed.
    ///
    /// The configuration file itself need not exist.
    ///
    /// # Errors
    ///
    /// Returns path errors, or I/O errors other than "not found".
    fn detect(&self) -> ClientAdapterResult<bool>;

    /// Reads the current configuration.
    ///
    /// A missing file yields an empty [`StateOrigin::Missing`] state and an
    /// unparsable one an empty [`StateOrigin::Unparsable`] state.
    ///
    /// [`StateOrigin::Missing`]: crate::client::domain::StateOrigin::Missing
    /// [`StateOrigin::Unparsable`]: crate::client::domain::StateOrigin::Unparsable
    ///
    /// # Errors
    ///
    /// Returns path errors or read failures other than "not found".
    fn load(&self) -> ClientAdapterResult<ClientState>;

    /// Serialises `state` in the client's native shape.
    ///
    /// Output is deterministic for a given state.
    ///
    /// # Errors
    ///
    /// Returns [`ClientAdapterError::Render`] when serialisation fails.
    fn render(&self, state: &ClientState) -> ClientAdapterResult<String>;

    /// Copies the current file to `<file>.bak.<YYYYMMDD-HHMMSS>`.
    ///
    /// Returns `None` when there is no file to back up.
    ///
    /// # Errors
    ///
    /// Returns [`ClientAdapterError::Backup`] when the copy fails.
    fn backup(&self, taken_at: DateTime<Local>) -> ClientAdapterResult<Option<Utf8PathBuf>>;

    /// Replaces the configuration file, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientAdapterError::Write`] when the write fails.
    fn write(&self, contents: &str) -> ClientAdapterResult<()>;

    /// Copies `backup` back over the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientAdapterError::Restore`] when the copy fails.
    fn restore(&self, backup: &Utf8Path) -> ClientAdapterResult<()>;
}

/// Errors returned by client adapters.
#[derive(Debug, Error)]
pub enum ClientAdapterError {
    /// The configuration path could not be computed.
    #[error("cannot locate {client} configuration: {source}")]
    Path {
        /// Client identifier.
        client: String,
        /// Missing root or unsupported OS.
        source: ClientPathError,
    },

    /// Probing for the client failed.
    #[error("failed to detect {client} at {path}: {source}")]
    Detect {
        /// Client identifier.
        client: String,
        /// Probed path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read {client} configuration {path}: {source}")]
    Read {
        /// Client identifier.
        client: String,
        /// Configuration path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The state could not be serialised.
    #[error("failed to render {client} configuration: {source}")]
    Render {
        /// Client identifier.
        client: String,
        /// Underlying encode failure.
        source: serde_json::Error,
    },

    /// The backup copy failed.
    #[error("failed to back up {path} to {backup}: {source}")]
    Backup {
        /// Configuration path.
        path: Utf8PathBuf,
        /// Intended backup path.
        backup: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("failed to write {client} configuration {path}: {source}")]
    Write {
        /// Client identifier.
        client: String,
        /// Configuration path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Copying a backup back failed.
    #[error("failed to restore {path} from {backup}: {source}")]
    Restore {
        /// Configuration path.
        path: Utf8PathBuf,
        /// Backup being restored.
        backup: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

impl ClientAdapterError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Path { .. } => ErrorKind::UnsupportedPlatform,
            Self::Detect { .. }
            | Self::Read { .. }
            | Self::Render { .. }
            | Self::Backup { .. }
            | Self::Write { .. }
            | Self::Restore { .. } => ErrorKind::IoFailure,
        }
    }
}
