//! Cursor editor. Servers live in the user settings document.

use super::{ConfigLayout, JsonConfigClient};
use crate::client::domain::{ClientPathError, PlatformDirs};
use camino::Utf8PathBuf;

/// Client identifier.
pub const NAME: &str = "cursor";

/// Returns `<app support>/Cursor/User/settings.json`.
///
/// # Errors
///
/// Returns [`ClientPathError`] when the per-user root is unknown.
pub fn config_path(dirs: &PlatformDirs) -> Result<Utf8PathBuf, ClientPathError> {
    dirs.app_support(&["Cursor", "User", "settings.json"])
}

/// Builds the Cursor adapter.
#[must_use]
pub fn adapter(dirs: &PlatformDirs) -> JsonConfigClient {
    JsonConfigClient::new(
        NAME,
        "Cursor",
        ConfigLayout::EDITOR_SETTINGS,
        config_path(dirs),
    )
}
