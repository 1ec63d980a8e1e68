//! Shared fixtures for unit tests.

use crate::canonical::domain::{CanonicalDocument, CanonicalServer, ServerName};
use camino::Utf8PathBuf;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
                .single()
                .expect("fixed timestamp should be valid"),
        )
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(2024, 5, 17, 9, 30, 0)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn server(name: &str, command: &str) -> CanonicalServer {
    CanonicalServer::new(
        ServerName::new(name).expect("test server name should be valid"),
        command,
    )
}

pub(crate) fn document_with(servers: impl IntoIterator<Item = CanonicalServer>) -> CanonicalDocument {
    let mut document = CanonicalDocument::empty(FixedClock::default().utc());
    for entry in servers {
        document
            .add_server(entry)
            .expect("test servers should have unique names");
    }
    document
}

pub(crate) fn scratch_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root =
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("temp path should be UTF-8");
    (temp, root)
}
