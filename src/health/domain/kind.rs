//! Supported probe types.

use crate::error::ErrorKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Probe type named by a health check's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthCheckKind {
    /// Launch the server command and watch it briefly.
    Stdio,
    /// Issue an HTTP GET.
    Http,
    /// Open a TCP connection.
    Tcp,
}

impl HealthCheckKind {
    /// Returns the lowercase type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Tcp => "tcp",
        }
    }
}

impl fmt::Display for HealthCheckKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The `type` field names no known probe.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown health check type: {0}")]
pub struct UnknownCheckKind(pub String);

impl UnknownCheckKind {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::CheckError
    }
}

impl FromStr for HealthCheckKind {
    type Err = UnknownCheckKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "stdio" => Ok(Self::Stdio),
            "http" => Ok(Self::Http),
            "tcp" => Ok(Self::Tcp),
            other => Err(UnknownCheckKind(other.to_owned())),
        }
    }
}
