//! Visual Studio Code. Servers live in the user settings document.

use super::{ConfigLayout, JsonConfigClient};
use crate::client::domain::{ClientPathError, PlatformDirs};
use camino::Utf8PathBuf;

/// Client identifier.
pub const NAME: &str = "vscode";

/// Returns `<app support>/Code/User/settings.json`.
///
/// # Errors
///
/// Returns [`ClientPathError`] when the per-user root is unknown.
pub fn config_path(dirs: &PlatformDirs) -> Result<Utf8PathBuf, ClientPathError> {
    dirs.app_support(&["Code", "User", "settings.json"])
}

/// Builds the VS Code adapter.
#[must_use]
pub fn adapter(dirs: &PlatformDirs) -> JsonConfigClient {
    JsonConfigClient::new(
        NAME,
        "VS Code",
        ConfigLayout::EDITOR_SETTINGS,
        config_path(dirs),
    )
}
