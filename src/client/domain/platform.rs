//! Per-user directory roots that client paths are computed from.

use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use thiserror::Error;

/// Operating systems with known client locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS.
    MacOs,
    /// Linux and other XDG desktops.
    Linux,
    /// Windows.
    Windows,
}

impl Platform {
    /// Returns the platform this binary was compiled for.
    ///
    /// # Errors
    ///
    /// Returns [`ClientPathError::UnsupportedPlatform`] on any other OS.
    pub fn current() -> Result<Self, ClientPathError> {
        match std::env::consts::OS {
            "macos" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "windows" => Ok(Self::Windows),
            other => Err(ClientPathError::UnsupportedPlatform(other.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Windows => "windows",
        })
    }
}

/// Why a client's configuration path could not be computed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientPathError {
    /// A directory the path is rooted in is unknown.
    #[error("{0} is not set")]
    MissingEnvironment(&'static str),

    /// The client has no known location on this OS.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Snapshot of the directories client paths are rooted in.
///
/// Taken once per invocation so every adapter sees the same roots, and so
/// tests can point adapters at a scratch directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    platform: Result<Platform, ClientPathError>,
    home: Option<Utf8PathBuf>,
    app_data: Option<Utf8PathBuf>,
}

impl PlatformDirs {
    /// Creates a snapshot from explicit roots.
    #[must_use]
    pub const fn new(
        platform: Platform,
        home: Option<Utf8PathBuf>,
        app_data: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            platform: Ok(platform),
            home,
            app_data,
        }
    }

    /// Reads the roots for the current user.
    ///
    /// The Windows roaming application-data directory is only consulted on
    /// Windows. Roots that are not valid UTF-8 are treated as unset.
    #[must_use]
    pub fn from_env() -> Self {
        let platform = Platform::current();
        let app_data = match platform {
            Ok(Platform::Windows) => dirs::config_dir().and_then(utf8),
            _ => None,
        };
        Self {
            platform,
            home: dirs::home_dir().and_then(utf8),
            app_data,
        }
    }

    /// Returns the platform.
    ///
    /// # Errors
    ///
    /// Returns [`ClientPathError::UnsupportedPlatform`] when the snapshot
    /// was taken on an unknown OS.
    pub fn platform(&self) -> Result<Platform, ClientPathError> {
        self.platform.clone()
    }

    /// Returns the home directory.
    ///
    /// # Errors
    ///
    /// Returns [`ClientPathError::MissingEnvironment`] when unknown.
    pub fn home(&self) -> Result<&Utf8Path, ClientPathError> {
        self.home
            .as_deref()
            .ok_or(ClientPathError::MissingEnvironment("HOME"))
    }

    /// Returns `%APPDATA%`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientPathError::MissingEnvironment`] when unknown.
    pub fn app_data(&self) -> Result<&Utf8Path, ClientPathError> {
        self.app_data
            .as_deref()
            .ok_or(ClientPathError::MissingEnvironment("APPDATA"))
    }

    /// Joins `segments` onto the per-user application-support root: the
    /// `Application Support` library folder on macOS, `~/.config` on Linux,
    /// and `%APPDATA%` on Windows.
    ///
    /// # Errors
    ///
    /// Returns [`ClientPathError`] when the root is unknown.
    pub fn app_support(&self, segments: &[&str]) -> Result<Utf8PathBuf, ClientPathError> {
        let root = match self.platform()? {
            Platform::MacOs => self.home()?.join("Library").join("Application Support"),
            Platform::Linux => self.home()?.join(".config"),
            Platform::Windows => self.app_data()?.to_owned(),
        };
        Ok(join_all(root, segments))
    }
}

pub(crate) fn join_all(root: Utf8PathBuf, segments: &[&str]) -> Utf8PathBuf {
    segments
        .iter()
        .fold(root, |path, segment| path.join(segment))
}

fn utf8(path: std::path::PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
