//! Test doubles for reconciliation tests.

use crate::client::{
    adapters::{ConfigLayout, JsonConfigClient},
    domain::ClientState,
    ports::{ClientAdapter, ClientAdapterError, ClientAdapterResult},
};
use crate::reconcile::{ApprovalError, ApprovalGate, ApprovalRequest};
use crate::test_support::scratch_dir;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Local};

pub(super) struct ClientDir {
    _temp: tempfile::TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) path: Utf8PathBuf,
}

impl ClientDir {
    pub(super) fn new() -> Self {
        let (temp, root) = scratch_dir();
        let path = root.join("client.json");
        Self {
            _temp: temp,
            root,
            path,
        }
    }

    pub(super) fn client(&self) -> JsonConfigClient {
        JsonConfigClient::new("desk", "Desk", ConfigLayout::MCP_SERVERS, Ok(self.path.clone()))
    }

    pub(super) fn seed(&self, contents: &str) {
        crate::fs_utils::write_creating_parent(&self.path, contents)
            .expect("seed write should succeed");
    }

    pub(super) fn contents(&self) -> Option<String> {
        crate::fs_utils::read_optional(&self.path).expect("read should succeed")
    }

    pub(super) fn backups(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.root)
            .expect("scratch dir should be readable")
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.contains(".bak."))
            .collect();
        names.sort();
        names
    }
}

/// Wraps a real adapter and fails chosen steps.
pub(super) struct FlakyAdapter {
    pub(super) inner: JsonConfigClient,
    pub(super) fail_backup: bool,
    pub(super) fail_write: bool,
}

fn injected(path: &Utf8Path) -> std::io::Error {
    std::io::Error::other(format!("injected failure for {path}"))
}

impl ClientAdapter for FlakyAdapter {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn display_name(&self) -> &str {
        self.inner.display_name()
    }

    fn path(&self) -> ClientAdapterResult<Utf8PathBuf> {
        self.inner.path()
    }

    fn detect(&self) -> ClientAdapterResult<bool> {
        self.inner.detect()
    }

    fn load(&self) -> ClientAdapterResult<ClientState> {
        self.inner.load()
    }

    fn render(&self, state: &ClientState) -> ClientAdapterResult<String> {
        self.inner.render(state)
    }

    fn backup(&self, taken_at: DateTime<Local>) -> ClientAdapterResult<Option<Utf8PathBuf>> {
        if self.fail_backup {
            let path = self.inner.path()?;
            return Err(ClientAdapterError::Backup {
                backup: Utf8PathBuf::from(format!("{path}.bak")),
                source: injected(&path),
                path,
            });
        }
        self.inner.backup(taken_at)
    }

    fn write(&self, contents: &str) -> ClientAdapterResult<()> {
        if self.fail_write {
            let path = self.inner.path()?;
            return Err(ClientAdapterError::Write {
                client: self.name().to_owned(),
                source: injected(&path),
                path,
            });
        }
        self.inner.write(contents)
    }

    fn restore(&self, backup: &Utf8Path) -> ClientAdapterResult<()> {
        self.inner.restore(backup)
    }
}

/// Gate with a fixed answer that records how often it was asked.
#[derive(Default)]
pub(super) struct CountingGate {
    pub(super) answer: bool,
    pub(super) asked: usize,
}

impl CountingGate {
    pub(super) fn answering(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }
}

impl ApprovalGate for CountingGate {
    fn approve(&mut self, _request: &ApprovalRequest<'_>) -> Result<bool, ApprovalError> {
        self.asked += 1;
        Ok(self.answer)
    }
}
