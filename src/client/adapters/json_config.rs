//! Generic adapter for clients that keep servers in a JSON object.

use crate::client::domain::{ClientPathError, ClientState, StateOrigin};
use crate::client::ports::{ClientAdapter, ClientAdapterError, ClientAdapterResult};
use crate::fs_utils;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const BACKUP_TIMESTAMP: &str = "%Y%m%d-%H%M%S";

/// Where a client keeps its server map inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigLayout {
    /// Top-level key holding the server map. `mcp.servers` is a flat key,
    /// not a nested path.
    pub server_key: &'static str,
    /// Drop the key entirely when no servers remain, for clients whose
    /// file is a general settings document.
    pub omit_when_empty: bool,
}

impl ConfigLayout {
    /// Dedicated file with a top-level `mcpServers` map.
    pub const MCP_SERVERS: Self = Self {
        server_key: "mcpServers",
        omit_when_empty: false,
    };

    /// Dedicated file with a top-level `mcp_servers` map.
    pub const MCP_SERVERS_SNAKE: Self = Self {
        server_key: "mcp_servers",
        omit_when_empty: false,
    };

    /// Editor settings document with a flat `mcp.servers` key.
    pub const EDITOR_SETTINGS: Self = Self {
        server_key: "mcp.servers",
        omit_when_empty: true,
    };
}

/// Client adapter over a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigClient {
    name: String,
    display_name: String,
    layout: ConfigLayout,
    location: Result<Utf8PathBuf, ClientPathError>,
    install_markers: Vec<Utf8PathBuf>,
}

impl JsonConfigClient {
    /// Creates an adapter for the file at `location`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        layout: ConfigLayout,
        location: Result<Utf8PathBuf, ClientPathError>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            layout,
            location,
            install_markers: Vec::new(),
        }
    }

    /// Adds extra paths whose existence counts as the client being
    /// installed.
    #[must_use]
    pub fn with_install_markers(mut self, markers: impl IntoIterator<Item = Utf8PathBuf>) -> Self {
        self.install_markers.extend(markers);
        self
    }

    /// Returns the file layout.
    #[must_use]
    pub const fn layout(&self) -> ConfigLayout {
        self.layout
    }

    fn parse(&self, path: &Utf8Path, raw: &str) -> ClientState {
        if raw.trim().is_empty() {
            return ClientState::empty(StateOrigin::Parsed);
        }
        let mut settings = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(client = %self.name, path = %path, "configuration is not a JSON object; treating as empty");
                return ClientState::empty(StateOrigin::Unparsable);
            }
            Err(err) => {
                tracing::warn!(client = %self.name, path = %path, error = %err, "configuration is not valid JSON; treating as empty");
                return ClientState::empty(StateOrigin::Unparsable);
            }
        };

        let servers: BTreeMap<String, Value> = match settings.remove(self.layout.server_key) {
            Some(Value::Object(entries)) => entries.into_iter().collect(),
            Some(Value::Null) | None => BTreeMap::new(),
            Some(_) => {
                tracing::warn!(
                    client = %self.name,
                    key = self.layout.server_key,
                    "server key does not hold an object; it will be replaced"
                );
                BTreeMap::new()
            }
        };
        ClientState::new(servers, settings, StateOrigin::Parsed)
    }

    fn to_document(&self, state: &ClientState) -> Value {
        let mut document: Map<String, Value> = state.settings().clone();
        if !(self.layout.omit_when_empty && state.servers().is_empty()) {
            let servers: Map<String, Value> = state
                .servers()
                .iter()
                .map(|(name, entry)| (name.clone(), entry.clone()))
                .collect();
            document.insert(self.layout.server_key.to_owned(), Value::Object(servers));
        }
        Value::Object(document)
    }
}

impl ClientAdapter for JsonConfigClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn path(&self) -> ClientAdapterResult<Utf8PathBuf> {
        self.location
            .clone()
            .map_err(|source| ClientAdapterError::Path {
                client: self.name.clone(),
                source,
            })
    }

    fn detect(&self) -> ClientAdapterResult<bool> {
        let path = self.path()?;
        let config_dir = path.parent().map_or_else(|| path.clone(), Utf8Path::to_owned);
        for probe in std::iter::once(&config_dir).chain(&self.install_markers) {
            let present = fs_utils::exists(probe).map_err(|source| ClientAdapterError::Detect {
                client: self.name.clone(),
                path: probe.clone(),
                source,
            })?;
            if present {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn load(&self) -> ClientAdapterResult<ClientState> {
        let path = self.path()?;
        let contents =
            fs_utils::read_optional(&path).map_err(|source| ClientAdapterError::Read {
                client: self.name.clone(),
                path: path.clone(),
                source,
            })?;
        Ok(contents.map_or_else(
            || ClientState::empty(StateOrigin::Missing),
            |raw| self.parse(&path, &raw),
        ))
    }

    fn render(&self, state: &ClientState) -> ClientAdapterResult<String> {
        let mut rendered =
            serde_json::to_string_pretty(&self.to_document(state)).map_err(|source| {
                ClientAdapterError::Render {
                    client: self.name.clone(),
                    source,
                }
            })?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn backup(&self, taken_at: DateTime<Local>) -> ClientAdapterResult<Option<Utf8PathBuf>> {
        let path = self.path()?;
        let backup = Utf8PathBuf::from(format!(
            "{path}.bak.{}",
            taken_at.format(BACKUP_TIMESTAMP)
        ));
        let exists = fs_utils::exists(&path).map_err(|source| ClientAdapterError::Backup {
            path: path.clone(),
            backup: backup.clone(),
            source,
        })?;
        if !exists {
            return Ok(None);
        }
        fs_utils::copy_file(&path, &backup).map_err(|source| ClientAdapterError::Backup {
            path: path.clone(),
            backup: backup.clone(),
            source,
        })?;
        tracing::info!(client = %self.name, backup = %backup, "backed up client configuration");
        Ok(Some(backup))
    }

    fn write(&self, contents: &str) -> ClientAdapterResult<()> {
        let path = self.path()?;
        fs_utils::write_creating_parent(&path, contents).map_err(|source| {
            ClientAdapterError::Write {
                client: self.name.clone(),
                path: path.clone(),
                source,
            }
        })?;
        tracing::info!(client = %self.name, path = %path, "wrote client configuration");
        Ok(())
    }

    fn restore(&self, backup: &Utf8Path) -> ClientAdapterResult<()> {
        let path = self.path()?;
        fs_utils::copy_file(backup, &path).map_err(|source| ClientAdapterError::Restore {
            path: path.clone(),
            backup: backup.to_owned(),
            source,
        })?;
        tracing::info!(client = %self.name, backup = %backup, "restored client configuration");
        Ok(())
    }
}
