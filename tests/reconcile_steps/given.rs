//! Given steps for reconciliation BDD scenarios.

use super::world::ReconcileWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchboard::canonical::domain::{CanonicalServer, HealthCheckSpec, ServerName};

fn canonical_server(name: &str, command: &str) -> Result<CanonicalServer, eyre::Report> {
    let server_name = ServerName::new(name).wrap_err("scenario server name")?;
    Ok(CanonicalServer::new(server_name, command))
}

#[given(r#"the canonical document holds a disabled server "{name}" running "{command}""#)]
fn disabled_server(
    world: &mut ReconcileWorld,
    name: String,
    command: String,
) -> Result<(), eyre::Report> {
    world
        .pending_servers
        .push(canonical_server(&name, &command)?);
    Ok(())
}

#[given(r#"a disabled server "{name}" tagged "{tag}" running "{command}""#)]
fn disabled_tagged_server(
    world: &mut ReconcileWorld,
    name: String,
    tag: String,
    command: String,
) -> Result<(), eyre::Report> {
    world
        .pending_servers
        .push(canonical_server(&name, &command)?.with_tags([tag]));
    Ok(())
}

#[given(r#"an enabled server "{name}" running "{command}" with arguments "{first}" and "{second}""#)]
fn enabled_server_with_arguments(
    world: &mut ReconcileWorld,
    name: String,
    command: String,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    world.pending_servers.push(
        canonical_server(&name, &command)?
            .with_args([first, second])
            .with_enabled(true),
    );
    Ok(())
}

#[given("its health check is stdio with a {timeout:u64} ms timeout and {retries:u32} retries")]
fn stdio_health_check(
    world: &mut ReconcileWorld,
    timeout: u64,
    retries: u32,
) -> Result<(), eyre::Report> {
    let server = world
        .pending_servers
        .pop()
        .ok_or_else(|| eyre::eyre!("no pending server in scenario world"))?;
    world.pending_servers.push(
        server.with_health_check(
            HealthCheckSpec::new("stdio")
                .with_timeout_ms(timeout)
                .with_retries(retries),
        ),
    );
    Ok(())
}

#[given(r#"the client file contains "{key}" set to "{value}""#)]
fn client_file_contains(
    world: &mut ReconcileWorld,
    key: String,
    value: String,
) -> Result<(), eyre::Report> {
    let contents = serde_json::json!({ key: value });
    let rendered = serde_json::to_string_pretty(&contents).wrap_err("render client seed")?;
    std::fs::write(&world.client_path, rendered)
        .wrap_err_with(|| format!("seed {}", world.client_path))
}
