//! Claude Desktop.

use super::{ConfigLayout, JsonConfigClient};
use crate::client::domain::{ClientPathError, PlatformDirs};
use camino::Utf8PathBuf;

/// Client identifier.
pub const NAME: &str = "claude";

/// Returns `<app support>/Claude/claude_desktop_config.json`.
///
/// # Errors
///
/// Returns [`ClientPathError`] when the per-user root is unknown.
pub fn config_path(dirs: &PlatformDirs) -> Result<Utf8PathBuf, ClientPathError> {
    dirs.app_support(&["Claude", "claude_desktop_config.json"])
}

/// Builds the Claude Desktop adapter.
#[must_use]
pub fn adapter(dirs: &PlatformDirs) -> JsonConfigClient {
    JsonConfigClient::new(
        NAME,
        "Claude Desktop",
        ConfigLayout::MCP_SERVERS,
        config_path(dirs),
    )
}
