//! Crate-wide error taxonomy.
//!
//! Each module keeps its own error enum; [`ErrorKind`] is the coarse
//! classification a front end uses to pick exit codes and wording.

use std::fmt;

/// Coarse classification shared by every error in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A server, profile, client, or file does not exist.
    NotFound,
    /// A query matched several servers and nobody chose between them.
    Ambiguous,
    /// Reading, writing, or copying a file failed.
    IoFailure,
    /// The current OS has no known location for a client.
    UnsupportedPlatform,
    /// A health check could not be run at all.
    CheckError,
    /// A name, selection, or setting was rejected.
    InvalidInput,
}

impl ErrorKind {
    /// Returns a stable snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Ambiguous => "ambiguous",
            Self::IoFailure => "io_failure",
            Self::UnsupportedPlatform => "unsupported_platform",
            Self::CheckError => "check_error",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
