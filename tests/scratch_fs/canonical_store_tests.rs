//! Canonical document persistence through the public store and profile
//! services.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use switchboard::{
    canonical::{
        adapters::JsonFileCanonicalStore,
        ports::CanonicalStore,
        services::ProfileService,
    },
    error::ErrorKind,
};

use super::helpers::server;

struct StoreFile {
    _temp: tempfile::TempDir,
    path: Utf8PathBuf,
}

impl StoreFile {
    fn open(&self) -> JsonFileCanonicalStore<DefaultClock> {
        JsonFileCanonicalStore::new(self.path.clone(), Arc::new(DefaultClock))
    }
}

#[fixture]
fn store_file() -> StoreFile {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root =
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("temp path should be UTF-8");
    StoreFile {
        path: root.join("switchboard").join("canonical.json"),
        _temp: temp,
    }
}

#[rstest]
fn saved_servers_survive_a_fresh_store(store_file: StoreFile) {
    let writer = store_file.open();
    let mut document = writer.load().expect("missing file should load empty");
    document
        .add_server(
            server("github", "gh-mcp")
                .with_aliases(["gh".to_owned()])
                .with_enabled(true),
        )
        .expect("add should succeed");
    document
        .add_server(server("postgres", "pg-mcp"))
        .expect("add should succeed");
    writer.save(&mut document).expect("save should succeed");

    let reloaded = store_file.open().load().expect("reload should succeed");

    assert_eq!(reloaded, document);
    assert_eq!(
        reloaded.enabled_set().into_iter().collect::<Vec<_>>(),
        vec!["github"]
    );
}

#[rstest]
fn written_document_uses_the_wire_field_names(store_file: StoreFile) {
    let store = store_file.open();
    let mut document = store.load().expect("load should succeed");
    document
        .add_server(server("github", "gh-mcp"))
        .expect("add should succeed");
    store.save(&mut document).expect("save should succeed");

    let raw = std::fs::read_to_string(&store_file.path).expect("document should exist");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("document should be JSON");

    assert_eq!(value["servers"][0]["name"], "github");
    assert_eq!(value["servers"][0]["enabled"], false);
    assert!(value["meta"]["updatedAt"].is_string());
    assert!(raw.ends_with('\n'));
}

#[rstest]
fn profile_lifecycle_is_persisted(store_file: StoreFile) {
    let store = Arc::new(store_file.open());
    let mut document = store.load().expect("load should succeed");
    for (name, command) in [("github", "gh-mcp"), ("postgres", "pg-mcp"), ("redis", "rd-mcp")] {
        document
            .add_server(server(name, command))
            .expect("add should succeed");
    }
    store.save(&mut document).expect("save should succeed");

    let profiles = ProfileService::new(Arc::clone(&store));
    profiles
        .create("data", vec!["postgres".to_owned(), "redis".to_owned()])
        .expect("create should succeed");
    let (applied, application) = profiles.apply("data").expect("apply should succeed");

    assert_eq!(
        application
            .enabled
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>(),
        vec!["postgres", "redis"]
    );
    assert!(application.missing.is_empty());
    let reloaded = store_file.open().load().expect("reload should succeed");
    assert_eq!(reloaded, applied);
    assert_eq!(
        reloaded.enabled_set().into_iter().collect::<Vec<_>>(),
        vec!["postgres", "redis"]
    );

    profiles.delete("data").expect("delete should succeed");
    assert!(profiles.list().expect("list should succeed").is_empty());
}

#[rstest]
fn corrupt_document_is_reported_as_invalid_input(store_file: StoreFile) {
    let parent = store_file.path.parent().expect("path should have a parent");
    std::fs::create_dir_all(parent).expect("parent should be created");
    std::fs::write(&store_file.path, "{ not json").expect("write should succeed");

    let err = store_file.open().load().expect_err("corrupt file should fail");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().contains(store_file.path.as_str()));
}
