//! When steps for reconciliation BDD scenarios.

use super::world::{CLIENT, ReconcileWorld, ScriptedChoice, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use switchboard::{reconcile::AutoApprove, resolver::RejectAmbiguous};
use tokio_util::sync::CancellationToken;

#[when(r#"the user enables "{query}" for the client"#)]
fn user_enables(world: &mut ReconcileWorld, query: String) -> Result<(), eyre::Report> {
    let report = world
        .switchboard()?
        .enable(
            &query,
            Some(CLIENT),
            false,
            &mut RejectAmbiguous,
            &mut AutoApprove,
        )
        .wrap_err("enable server")?;
    world.last_toggle = Some(report);
    Ok(())
}

#[when(r#"the user enables "{query}" for the client and picks candidate {choice:usize}"#)]
fn user_enables_and_picks(
    world: &mut ReconcileWorld,
    query: String,
    choice: usize,
) -> Result<(), eyre::Report> {
    let index = choice
        .checked_sub(1)
        .ok_or_else(|| eyre::eyre!("candidates are numbered from 1"))?;
    let mut picker = ScriptedChoice {
        index,
        offered: Vec::new(),
    };
    let report = world
        .switchboard()?
        .enable(&query, Some(CLIENT), false, &mut picker, &mut AutoApprove)
        .wrap_err("enable server after choosing")?;
    world.offered = picker.offered;
    world.last_toggle = Some(report);
    Ok(())
}

#[when(r#"the server "{name}" is health checked"#)]
fn server_is_health_checked(world: &mut ReconcileWorld, name: String) -> Result<(), eyre::Report> {
    let switchboard = world.switchboard()?;
    let cancel = CancellationToken::new();
    let run = run_async(switchboard.health(None, Some(&name), false, &cancel))
        .wrap_err("run health check")?;
    world.last_health = Some(run);
    Ok(())
}
