//! Cline, the VS Code extension, which keeps its own server file in the
//! editor's global storage.

use super::{ConfigLayout, JsonConfigClient};
use crate::client::domain::{ClientPathError, PlatformDirs};
use camino::Utf8PathBuf;

/// Client identifier.
pub const NAME: &str = "cline";

const EXTENSION_ID: &str = "saoudrizwan.claude-dev";

/// Returns the extension's `mcp_servers.json` under VS Code global storage.
///
/// # Errors
///
/// Returns [`ClientPathError`] when the per-user root is unknown.
pub fn config_path(dirs: &PlatformDirs) -> Result<Utf8PathBuf, ClientPathError> {
    dirs.app_support(&[
        "Code",
        "User",
        "globalStorage",
        EXTENSION_ID,
        "mcp_servers.json",
    ])
}

/// Builds the Cline adapter.
#[must_use]
pub fn adapter(dirs: &PlatformDirs) -> JsonConfigClient {
    JsonConfigClient::new(NAME, "Cline", ConfigLayout::MCP_SERVERS, config_path(dirs))
}
