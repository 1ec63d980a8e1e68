//! Shared fixtures for scratch-directory integration tests.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultClock;
use rstest::fixture;
use switchboard::{
    canonical::{
        adapters::InMemoryCanonicalStore,
        domain::{CanonicalDocument, CanonicalServer, ServerName},
        ports::CanonicalStore,
    },
    client::{
        domain::{Platform, PlatformDirs},
        services::ClientRegistry,
    },
    config::SwitchboardSettings,
    operations::Switchboard,
};

/// Store type used by the integration tests.
pub type TestStore = InMemoryCanonicalStore<DefaultClock>;

/// Fully wired command surface over a scratch home directory.
pub type TestSwitchboard = Switchboard<TestStore, DefaultClock>;

/// Scratch Linux home with the standard client set rooted in it.
pub struct Home {
    _temp: tempfile::TempDir,
    /// Home directory the client paths are rooted in.
    pub root: Utf8PathBuf,
    /// Canonical store shared with every switchboard built here.
    pub store: Arc<TestStore>,
}

impl Home {
    /// Path of the Claude Desktop configuration file.
    #[must_use]
    pub fn claude_config(&self) -> Utf8PathBuf {
        self.root
            .join(".config")
            .join("Claude")
            .join("claude_desktop_config.json")
    }

    /// Path of the VS Code settings file.
    #[must_use]
    pub fn vscode_settings(&self) -> Utf8PathBuf {
        self.root
            .join(".config")
            .join("Code")
            .join("User")
            .join("settings.json")
    }

    /// Marks a client installed by creating its configuration directory.
    pub fn install(&self, config: &Utf8Path) {
        let dir = config.parent().expect("config path should have a parent");
        std::fs::create_dir_all(dir).expect("client dir should be created");
    }

    /// Writes a client file verbatim.
    pub fn seed(&self, config: &Utf8Path, contents: &str) {
        self.install(config);
        std::fs::write(config, contents).expect("seed write should succeed");
    }

    /// Reads and parses a client file.
    pub fn read_json(&self, config: &Utf8Path) -> serde_json::Value {
        let raw = std::fs::read_to_string(config).expect("client file should exist");
        serde_json::from_str(&raw).expect("client file should be JSON")
    }

    /// Lists backup files next to `config`.
    pub fn backups(&self, config: &Utf8Path) -> Vec<Utf8PathBuf> {
        let dir = config.parent().expect("config path should have a parent");
        let prefix = format!("{}.bak.", config.file_name().unwrap_or_default());
        let mut found: Vec<Utf8PathBuf> = std::fs::read_dir(dir)
            .expect("client dir should be readable")
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(&prefix))
            .map(|name| dir.join(name))
            .collect();
        found.sort();
        found
    }

    /// Builds a switchboard over the standard Linux client set.
    #[must_use]
    pub fn switchboard(&self) -> TestSwitchboard {
        let dirs = PlatformDirs::new(Platform::Linux, Some(self.root.clone()), None);
        Switchboard::new(
            Arc::clone(&self.store),
            ClientRegistry::standard(&dirs),
            &SwitchboardSettings::default(),
            Arc::new(DefaultClock),
        )
    }

    /// Returns the saved canonical document.
    pub fn canonical(&self) -> CanonicalDocument {
        self.store.load().expect("canonical document should load")
    }
}

/// Creates a canonical server.
pub fn server(name: &str, command: &str) -> CanonicalServer {
    CanonicalServer::new(
        ServerName::new(name).expect("server name should be valid"),
        command,
    )
}

/// Creates a home whose canonical store holds `servers`.
pub fn home_with(servers: impl IntoIterator<Item = CanonicalServer>) -> Home {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root =
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("temp path should be UTF-8");
    let store = Arc::new(InMemoryCanonicalStore::new(Arc::new(DefaultClock)));
    let mut document = store.load().expect("empty store should load");
    for entry in servers {
        document
            .add_server(entry)
            .expect("servers should have unique names");
    }
    store.save(&mut document).expect("seed save should succeed");
    Home {
        _temp: temp,
        root,
        store,
    }
}

/// Home with one enabled and one disabled server.
#[fixture]
pub fn home() -> Home {
    home_with([
        server("github", "gh-mcp")
            .with_args(["--stdio".to_owned()])
            .with_enabled(true),
        server("postgres", "pg-mcp")
            .with_env([("PGHOST".to_owned(), "localhost".to_owned())]),
    ])
}
