//! Then steps for reconciliation BDD scenarios.

use super::world::ReconcileWorld;
use rstest_bdd_macros::then;
use switchboard::health::domain::HealthCheckResult;

fn only_result(world: &ReconcileWorld) -> Result<&HealthCheckResult, eyre::Report> {
    let run = world
        .last_health
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no health run recorded"))?;
    match run.report.results.as_slice() {
        [result] => Ok(result),
        other => Err(eyre::eyre!("expected one health result, got {}", other.len())),
    }
}

fn assert_enabled(world: &ReconcileWorld, name: &str, expected: bool) -> Result<(), eyre::Report> {
    let document = world.canonical()?;
    let server = document
        .find_by_name(name)
        .ok_or_else(|| eyre::eyre!("canonical server {name} missing"))?;
    if server.is_enabled() != expected {
        return Err(eyre::eyre!(
            "expected {name} enabled={expected}, found {}",
            server.is_enabled()
        ));
    }
    Ok(())
}

#[then(r#"the canonical server "{name}" is enabled"#)]
fn canonical_server_enabled(world: &mut ReconcileWorld, name: String) -> Result<(), eyre::Report> {
    assert_enabled(world, &name, true)
}

#[then(r#"the canonical server "{name}" is disabled"#)]
fn canonical_server_disabled(world: &mut ReconcileWorld, name: String) -> Result<(), eyre::Report> {
    assert_enabled(world, &name, false)
}

#[then(r#"the client file maps "{name}" to the command "{command}""#)]
fn client_file_maps(
    world: &mut ReconcileWorld,
    name: String,
    command: String,
) -> Result<(), eyre::Report> {
    let contents = world.client_json()?;
    let entry = contents
        .get("mcpServers")
        .and_then(|servers| servers.get(&name))
        .ok_or_else(|| eyre::eyre!("client file has no entry for {name}: {contents}"))?;
    if *entry != serde_json::json!({ "command": command }) {
        return Err(eyre::eyre!("unexpected entry for {name}: {entry}"));
    }
    Ok(())
}

#[then(r#"the client file still has "{key}" set to "{value}""#)]
fn client_file_keeps(
    world: &mut ReconcileWorld,
    key: String,
    value: String,
) -> Result<(), eyre::Report> {
    let contents = world.client_json()?;
    match contents.get(&key).and_then(serde_json::Value::as_str) {
        Some(found) if found == value => Ok(()),
        _ => Err(eyre::eyre!("client file lost {key}: {contents}")),
    }
}

#[then(r#"the user was offered "{first}" and "{second}" with score {score:i64}"#)]
fn user_was_offered(
    world: &mut ReconcileWorld,
    first: String,
    second: String,
    score: i64,
) -> Result<(), eyre::Report> {
    let expected = vec![(first, score), (second, score)];
    if world.offered != expected {
        return Err(eyre::eyre!(
            "expected {expected:?} to be offered, got {:?}",
            world.offered
        ));
    }
    Ok(())
}

#[then(r#"the health status is "{status}""#)]
fn health_status_is(world: &mut ReconcileWorld, status: String) -> Result<(), eyre::Report> {
    let result = only_result(world)?;
    if result.status.as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {} ({})",
            result.status,
            result.message
        ));
    }
    Ok(())
}

#[then("the check took at least {min:u64} ms and less than {max:u64} ms")]
fn check_duration_within(
    world: &mut ReconcileWorld,
    min: u64,
    max: u64,
) -> Result<(), eyre::Report> {
    let result = only_result(world)?;
    let elapsed = u64::try_from(result.duration.as_millis())?;
    if !(min..max).contains(&elapsed) {
        return Err(eyre::eyre!("check took {elapsed} ms, expected [{min}, {max})"));
    }
    Ok(())
}
