//! Warp terminal.

use super::{ConfigLayout, JsonConfigClient};
use crate::client::domain::{ClientPathError, Platform, PlatformDirs, join_all};
use camino::Utf8PathBuf;

/// Client identifier.
pub const NAME: &str = "warp";

const MACOS_APP_BUNDLE: &str = "/Applications/Warp.app";

/// Returns Warp's `mcp_config.json`.
///
/// Warp does not use the usual application-support root on macOS: the file
/// lives in `~/.warp`.
///
/// # Errors
///
/// Returns [`ClientPathError`] when the per-user root is unknown.
pub fn config_path(dirs: &PlatformDirs) -> Result<Utf8PathBuf, ClientPathError> {
    match dirs.platform()? {
        Platform::MacOs => Ok(join_all(
            dirs.home()?.to_owned(),
            &[".warp", "mcp_config.json"],
        )),
        Platform::Linux | Platform::Windows => dirs.app_support(&["warp", "mcp_config.json"]),
    }
}

/// Builds the Warp adapter.
///
/// On macOS the application bundle also counts as evidence of an install.
#[must_use]
pub fn adapter(dirs: &PlatformDirs) -> JsonConfigClient {
    let markers = match dirs.platform() {
        Ok(Platform::MacOs) => vec![Utf8PathBuf::from(MACOS_APP_BUNDLE)],
        _ => Vec::new(),
    };
    JsonConfigClient::new(
        NAME,
        "Warp",
        ConfigLayout::MCP_SERVERS_SNAKE,
        config_path(dirs),
    )
    .with_install_markers(markers)
}
