//! Reconciliation against the standard client set in a scratch home.

use rstest::rstest;
use serde_json::json;
use switchboard::{
    operations::OperationError,
    reconcile::{ApplyOutcome, AutoApprove, PromptApproval},
    resolver::RejectAmbiguous,
};

use super::helpers::{Home, home, home_with, server};

#[rstest]
fn apply_only_touches_installed_clients(home: Home) {
    home.install(&home.claude_config());

    let report = home
        .switchboard()
        .apply(None, None, &mut AutoApprove)
        .expect("apply should succeed");

    assert!(report.reconcile.is_success());
    assert_eq!(
        report
            .reconcile
            .reports()
            .iter()
            .map(|entry| entry.client.as_str())
            .collect::<Vec<_>>(),
        vec!["claude"]
    );
    assert_eq!(
        home.read_json(&home.claude_config()),
        json!({"mcpServers": {"github": {"command": "gh-mcp", "args": ["--stdio"]}}})
    );
    assert!(!home.vscode_settings().exists());
}

#[rstest]
fn apply_keeps_foreign_content_and_backs_up_the_original(home: Home) {
    let original = concat!(
        "{\"theme\": \"dark\", \"mcpServers\": {",
        "\"mine\": {\"command\": \"my-mcp\"}, ",
        "\"postgres\": {\"command\": \"stale\"}}}\n"
    );
    home.seed(&home.claude_config(), original);

    let report = home
        .switchboard()
        .apply(Some("claude"), None, &mut AutoApprove)
        .expect("apply should succeed");

    assert_eq!(
        home.read_json(&home.claude_config()),
        json!({
            "theme": "dark",
            "mcpServers": {
                "github": {"command": "gh-mcp", "args": ["--stdio"]},
                "mine": {"command": "my-mcp"}
            }
        })
    );
    let backups = home.backups(&home.claude_config());
    assert_eq!(backups.len(), 1);
    let first = backups.first().expect("one backup should exist");
    assert_eq!(
        std::fs::read_to_string(first).expect("backup should be readable"),
        original
    );
    let claude = report
        .reconcile
        .report("claude")
        .expect("claude should be reported");
    assert!(matches!(
        &claude.result,
        Ok(ApplyOutcome::Applied { backup: Some(path), .. }) if path == first
    ));
}

#[rstest]
fn second_apply_is_a_no_op(home: Home) {
    home.install(&home.claude_config());
    let switchboard = home.switchboard();
    switchboard
        .apply(None, None, &mut AutoApprove)
        .expect("first apply should succeed");
    let written = std::fs::read_to_string(home.claude_config()).expect("file should exist");

    let report = switchboard
        .apply(None, None, &mut AutoApprove)
        .expect("second apply should succeed");

    assert_eq!(report.reconcile.unchanged().count(), 1);
    assert_eq!(
        std::fs::read_to_string(home.claude_config()).expect("file should exist"),
        written
    );
    assert!(home.backups(&home.claude_config()).is_empty());
}

#[rstest]
fn editor_settings_drop_the_server_key_when_empty() {
    let home = home_with([server("github", "gh-mcp").with_enabled(true)]);
    home.seed(
        &home.vscode_settings(),
        "{\"editor.fontSize\": 14, \"mcp.servers\": {\"github\": {\"command\": \"gh-mcp\"}}}\n",
    );

    home.switchboard()
        .disable("github", Some("vscode"), false, &mut RejectAmbiguous, &mut AutoApprove)
        .expect("disable should succeed");

    assert_eq!(
        home.read_json(&home.vscode_settings()),
        json!({"editor.fontSize": 14})
    );
}

#[rstest]
#[case::declined("n\n", false)]
#[case::empty_answer("\n", false)]
#[case::approved("y\n", true)]
#[case::approved_long("YES\n", true)]
fn prompt_answer_decides_the_write(home: Home, #[case] answer: &str, #[case] written: bool) {
    home.seed(&home.claude_config(), "{}\n");
    let mut shown = Vec::new();
    let mut gate = PromptApproval::new(answer.as_bytes(), &mut shown);

    let report = home
        .switchboard()
        .apply(Some("claude"), None, &mut gate)
        .expect("apply should succeed");

    let transcript = String::from_utf8(shown).expect("prompt output should be UTF-8");
    assert!(transcript.contains("Apply these changes to claude? [y/N]: "));
    assert!(transcript.contains("+    \"github\": {"));
    assert_eq!(report.reconcile.applied().count(), usize::from(written));
    assert_eq!(report.reconcile.declined().count(), usize::from(!written));
    let contents = std::fs::read_to_string(home.claude_config()).expect("file should exist");
    assert_eq!(contents.contains("gh-mcp"), written);
}

#[rstest]
fn status_reports_drift_until_applied(home: Home) {
    home.seed(
        &home.claude_config(),
        "{\"mcpServers\": {\"postgres\": {\"command\": \"pg-mcp\"}, \"mine\": {\"command\": \"x\"}}}\n",
    );
    let switchboard = home.switchboard();

    let before = switchboard
        .status(Some("claude"))
        .expect("status should succeed");
    let claude = before.first().expect("claude status should be present");
    assert!(claude.installed);
    assert_eq!(
        claude
            .drift()
            .map(|row| row.name.as_str())
            .collect::<Vec<_>>(),
        vec!["github", "postgres"]
    );
    assert_eq!(claude.unmanaged, vec!["mine".to_owned()]);

    switchboard
        .apply(Some("claude"), None, &mut AutoApprove)
        .expect("apply should succeed");
    let after = switchboard
        .status(Some("claude"))
        .expect("status should succeed");
    assert!(after.iter().all(|status| status.is_in_sync()));
}

#[rstest]
fn status_without_a_client_lists_every_supported_client(home: Home) {
    let statuses = home.switchboard().status(None).expect("status should succeed");

    let names: Vec<&str> = statuses.iter().map(|status| status.client.as_str()).collect();
    assert!(names.contains(&"claude"));
    assert!(names.contains(&"vscode"));
    assert!(statuses.iter().all(|status| !status.installed));
}

#[rstest]
fn restore_puts_the_backup_back(home: Home) {
    let original = "{\"mcpServers\": {}}\n";
    home.seed(&home.claude_config(), original);
    let switchboard = home.switchboard();
    switchboard
        .apply(Some("claude"), None, &mut AutoApprove)
        .expect("apply should succeed");
    let backup = home
        .backups(&home.claude_config())
        .into_iter()
        .next()
        .expect("apply should leave a backup");

    switchboard
        .restore("claude", &backup)
        .expect("restore should succeed");

    assert_eq!(
        std::fs::read_to_string(home.claude_config()).expect("file should exist"),
        original
    );
}

#[rstest]
fn apply_without_installed_clients_fails(home: Home) {
    let err = home
        .switchboard()
        .apply(None, None, &mut AutoApprove)
        .expect_err("nothing is installed");

    assert!(matches!(err, OperationError::NoClients));
}

#[rstest]
fn profile_apply_enables_members_everywhere(home: Home) {
    home.install(&home.claude_config());
    home.install(&home.vscode_settings());
    let switchboard = home.switchboard();
    switchboard
        .create_profile("db", Some(vec!["postgres".to_owned()]))
        .expect("profile should be created");

    let report = switchboard
        .apply(None, Some("db"), &mut AutoApprove)
        .expect("apply should succeed");

    assert_eq!(report.reconcile.applied().count(), 2);
    let expected = json!({"postgres": {"command": "pg-mcp", "env": {"PGHOST": "localhost"}}});
    assert_eq!(home.read_json(&home.claude_config())["mcpServers"], expected);
    assert_eq!(home.read_json(&home.vscode_settings())["mcp.servers"], expected);
    assert_eq!(
        home.canonical().enabled_set().into_iter().collect::<Vec<_>>(),
        vec!["postgres"]
    );
}
