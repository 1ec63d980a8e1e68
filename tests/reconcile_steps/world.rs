//! Shared world state for reconciliation BDD scenarios.

use std::sync::Arc;

use camino::Utf8PathBuf;
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use switchboard::{
    canonical::{
        adapters::InMemoryCanonicalStore,
        domain::{CanonicalDocument, CanonicalServer},
        ports::CanonicalStore,
    },
    client::{
        adapters::{ConfigLayout, JsonConfigClient},
        services::ClientRegistry,
    },
    config::SwitchboardSettings,
    operations::{HealthRun, Switchboard, ToggleReport},
    resolver::{Candidate, Disambiguator, ResolveError},
};

/// Identifier of the single client the scenarios write to.
pub const CLIENT: &str = "editor";

/// Store type used by the BDD world.
pub type TestStore = InMemoryCanonicalStore<DefaultClock>;

/// Scenario world for reconciliation behaviour tests.
pub struct ReconcileWorld {
    _temp: tempfile::TempDir,
    /// Configuration file of the scenario client.
    pub client_path: Utf8PathBuf,
    /// Canonical store shared by every operation in a scenario.
    pub store: Arc<TestStore>,
    /// Servers declared by given steps, saved before the first action.
    pub pending_servers: Vec<CanonicalServer>,
    /// Candidates the user was asked to choose between.
    pub offered: Vec<(String, i64)>,
    /// Result of the last enable.
    pub last_toggle: Option<ToggleReport>,
    /// Result of the last health run.
    pub last_health: Option<HealthRun>,
}

impl ReconcileWorld {
    /// Creates a world with an installed, empty scenario client.
    ///
    /// # Panics
    ///
    /// Panics when the scratch directory cannot be prepared.
    #[must_use]
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .expect("temp path should be UTF-8");
        let client_dir = root.join(CLIENT);
        std::fs::create_dir_all(&client_dir).expect("client dir should be created");
        Self {
            _temp: temp,
            client_path: client_dir.join("config.json"),
            store: Arc::new(InMemoryCanonicalStore::new(Arc::new(DefaultClock))),
            pending_servers: Vec::new(),
            offered: Vec::new(),
            last_toggle: None,
            last_health: None,
        }
    }

    /// Saves pending servers and builds a switchboard over the scenario
    /// client.
    pub fn switchboard(
        &mut self,
    ) -> Result<Switchboard<TestStore, DefaultClock>, eyre::Report> {
        if !self.pending_servers.is_empty() {
            let mut document = self.store.load().wrap_err("load canonical document")?;
            for server in self.pending_servers.drain(..) {
                document
                    .add_server(server)
                    .wrap_err("add scenario server")?;
            }
            self.store
                .save(&mut document)
                .wrap_err("save scenario servers")?;
        }
        let registry = ClientRegistry::new().with_adapter(JsonConfigClient::new(
            CLIENT,
            "Editor",
            ConfigLayout::MCP_SERVERS,
            Ok(self.client_path.clone()),
        ));
        Ok(Switchboard::new(
            Arc::clone(&self.store),
            registry,
            &SwitchboardSettings::default(),
            Arc::new(DefaultClock),
        ))
    }

    /// Returns the saved canonical document.
    pub fn canonical(&self) -> Result<CanonicalDocument, eyre::Report> {
        self.store.load().wrap_err("load canonical document")
    }

    /// Reads the scenario client's file as JSON.
    pub fn client_json(&self) -> Result<serde_json::Value, eyre::Report> {
        let raw = std::fs::read_to_string(&self.client_path)
            .wrap_err_with(|| format!("read {}", self.client_path))?;
        serde_json::from_str(&raw).wrap_err("parse client file")
    }
}

impl Default for ReconcileWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReconcileWorld {
    ReconcileWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Picks a fixed candidate and remembers what was offered.
pub struct ScriptedChoice {
    /// Zero-based index to pick.
    pub index: usize,
    /// Offered candidates with their scores.
    pub offered: Vec<(String, i64)>,
}

impl Disambiguator for ScriptedChoice {
    fn choose(&mut self, _query: &str, band: &[Candidate<'_>]) -> Result<usize, ResolveError> {
        self.offered = band
            .iter()
            .map(|candidate| (candidate.name().to_owned(), candidate.score))
            .collect();
        Ok(self.index)
    }
}
