//! Harness wiring a [`Switchboard`] to scratch client files.

use crate::canonical::adapters::InMemoryCanonicalStore;
use crate::canonical::domain::{CanonicalDocument, CanonicalServer, HealthCheckSpec};
use crate::client::adapters::{ConfigLayout, JsonConfigClient};
use crate::client::services::ClientRegistry;
use crate::config::SwitchboardSettings;
use crate::health::domain::{CheckOutcome, HealthCheckKind, HealthPolicy};
use crate::health::ports::{CheckContext, HealthChecker};
use crate::health::services::HealthEngine;
use crate::operations::Switchboard;
use crate::resolver::{Candidate, Disambiguator, ResolveError};
use crate::test_support::{FixedClock, scratch_dir};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde_json::Value;
use std::sync::Arc;

pub(super) type TestStore = InMemoryCanonicalStore<FixedClock>;
pub(super) type TestSwitchboard = Switchboard<TestStore, FixedClock>;

/// Two clients: `alpha` is installed, `beta` is not.
pub(super) struct Harness {
    _temp: tempfile::TempDir,
    pub(super) alpha: Utf8PathBuf,
    pub(super) beta: Utf8PathBuf,
    pub(super) store: Arc<TestStore>,
    pub(super) clock: Arc<FixedClock>,
}

impl Harness {
    pub(super) fn new(document: CanonicalDocument) -> Self {
        let (temp, root) = scratch_dir();
        let alpha = root.join("alpha").join("config.json");
        let beta = root.join("beta").join("settings.json");
        std::fs::create_dir_all(root.join("alpha")).expect("alpha dir should be created");
        let clock = Arc::new(FixedClock::default());
        let store = Arc::new(InMemoryCanonicalStore::with_document(
            document,
            Arc::clone(&clock),
        ));
        Self {
            _temp: temp,
            alpha,
            beta,
            store,
            clock,
        }
    }

    fn registry(&self) -> ClientRegistry {
        ClientRegistry::new()
            .with_adapter(JsonConfigClient::new(
                "alpha",
                "Alpha",
                ConfigLayout::MCP_SERVERS,
                Ok(self.alpha.clone()),
            ))
            .with_adapter(JsonConfigClient::new(
                "beta",
                "Beta",
                ConfigLayout::EDITOR_SETTINGS,
                Ok(self.beta.clone()),
            ))
    }

    pub(super) fn switchboard(&self) -> TestSwitchboard {
        Switchboard::new(
            Arc::clone(&self.store),
            self.registry(),
            &SwitchboardSettings::default(),
            Arc::clone(&self.clock),
        )
    }

    /// Switchboard whose stdio probe fails the named servers.
    pub(super) fn with_probe(&self, failing: &[&str]) -> TestSwitchboard {
        let checker = ScriptedChecker {
            failing: failing.iter().map(|name| (*name).to_owned()).collect(),
        };
        let engine = HealthEngine::new(HealthPolicy::default(), Arc::clone(&self.clock))
            .with_checker(HealthCheckKind::Stdio, Arc::new(checker));
        self.switchboard().with_health_engine(engine)
    }

    pub(super) fn seed_alpha(&self, contents: &str) {
        crate::fs_utils::write_creating_parent(&self.alpha, contents)
            .expect("seed write should succeed");
    }

    pub(super) fn alpha_json(&self) -> Value {
        let raw = crate::fs_utils::read_optional(&self.alpha)
            .expect("read should succeed")
            .expect("alpha config should exist");
        serde_json::from_str(&raw).expect("alpha config should be JSON")
    }

    pub(super) fn saved(&self) -> CanonicalDocument {
        self.store
            .snapshot()
            .expect("snapshot should succeed")
            .expect("document should be present")
    }
}

/// Records the band it was shown and picks a fixed index.
pub(super) struct PickIndex {
    pub(super) index: usize,
    pub(super) shown: Vec<(String, i64)>,
}

impl PickIndex {
    pub(super) const fn new(index: usize) -> Self {
        Self {
            index,
            shown: Vec::new(),
        }
    }
}

impl Disambiguator for PickIndex {
    fn choose(&mut self, _query: &str, band: &[Candidate<'_>]) -> Result<usize, ResolveError> {
        self.shown = band
            .iter()
            .map(|candidate| (candidate.name().to_owned(), candidate.score))
            .collect();
        Ok(self.index)
    }
}

struct ScriptedChecker {
    failing: Vec<String>,
}

#[async_trait]
impl HealthChecker for ScriptedChecker {
    async fn check(
        &self,
        server: &CanonicalServer,
        _spec: &HealthCheckSpec,
        _context: &CheckContext,
    ) -> CheckOutcome {
        if self.failing.iter().any(|name| name == server.name().as_str()) {
            CheckOutcome::unhealthy("command exited with error: exit status: 1")
        } else {
            CheckOutcome::healthy("command started successfully")
        }
    }
}
