//! Behaviour tests for enabling servers and checking their health.

mod reconcile_steps;

use reconcile_steps::world::{ReconcileWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "Enabling a uniquely matched server writes it to the client"
)]
#[tokio::test(flavor = "multi_thread")]
async fn enable_unique_match(world: ReconcileWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reconcile.feature",
    name = "A near tie is offered to the user instead of being guessed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn near_tie_is_offered(world: ReconcileWorld) {
    let _ = world;
}

#[cfg(unix)]
#[scenario(
    path = "tests/features/reconcile.feature",
    name = "A stdio command that always fails is retried once"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failing_stdio_is_retried(world: ReconcileWorld) {
    let _ = world;
}
