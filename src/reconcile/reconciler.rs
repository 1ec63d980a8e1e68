//! Plan, approve, back up, write.

use super::{
    ApprovalGate, ApprovalRequest, ConfigDiff, ReconcileError, ReconcileSummary, merge_state,
};
use crate::canonical::domain::CanonicalDocument;
use crate::client::domain::{ClientState, StateOrigin};
use crate::client::ports::ClientAdapter;
use camino::{Utf8Path, Utf8PathBuf};
use mockable::Clock;
use std::sync::Arc;

/// Everything computed for one client before any side effect.
#[derive(Debug, Clone)]
pub struct ReconcilePlan {
    client: String,
    path: Utf8PathBuf,
    current: ClientState,
    proposed: ClientState,
    before: String,
    after: String,
    diff: ConfigDiff,
}

impl ReconcilePlan {
    /// Returns the client identifier.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Returns the configuration path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the state as loaded.
    #[must_use]
    pub const fn current(&self) -> &ClientState {
        &self.current
    }

    /// Returns the merged state.
    #[must_use]
    pub const fn proposed(&self) -> &ClientState {
        &self.proposed
    }

    /// Returns the rendered current state.
    #[must_use]
    pub fn before(&self) -> &str {
        &self.before
    }

    /// Returns the rendered merged state.
    #[must_use]
    pub fn after(&self) -> &str {
        &self.after
    }

    /// Returns the line diff.
    #[must_use]
    pub const fn diff(&self) -> &ConfigDiff {
        &self.diff
    }

    /// Returns whether applying would change nothing.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}

/// What happened to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The rendered state already matched; nothing was backed up or written.
    Unchanged,
    /// The change was not approved; nothing was backed up or written.
    Declined {
        /// The change that was refused.
        diff: ConfigDiff,
    },
    /// The change was written.
    Applied {
        /// File that was written.
        path: Utf8PathBuf,
        /// Backup of the previous file, if there was one.
        backup: Option<Utf8PathBuf>,
        /// The change that was written.
        diff: ConfigDiff,
    },
}

/// Drives client adapters through the merge and the write safety net.
#[derive(Debug, Clone)]
pub struct Reconciler<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
}

impl<C> Reconciler<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a reconciler that stamps backups with `clock`.
    #[must_use]
    pub const fn new(clock: Arc<C>) -> Self {
        Self { clock }
    }

    /// Loads the client, merges, and renders both versions.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Adapter`] when the client cannot be
    /// located, read, or rendered.
    pub fn plan(
        &self,
        adapter: &dyn ClientAdapter,
        document: &CanonicalDocument,
    ) -> Result<ReconcilePlan, ReconcileError> {
        let path = adapter.path()?;
        let current = adapter.load()?;
        if current.origin() == StateOrigin::Unparsable {
            tracing::warn!(
                client = adapter.name(),
                path = %path,
                "existing configuration is unreadable and will be replaced"
            );
        }
        let proposed = merge_state(&current, document);
        let before = adapter.render(&current)?;
        let after = adapter.render(&proposed)?;
        let diff = ConfigDiff::between(&before, &after);
        Ok(ReconcilePlan {
            client: adapter.name().to_owned(),
            path,
            current,
            proposed,
            before,
            after,
            diff,
        })
    }

    /// Reconciles one client.
    ///
    /// Nothing is touched when the rendering is unchanged or `gate`
    /// declines. An approved change is backed up first; a failed backup
    /// aborts before writing.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] for planning, approval, backup, or write
    /// failures. A write failure names the backup left behind.
    pub fn apply<G>(
        &self,
        adapter: &dyn ClientAdapter,
        document: &CanonicalDocument,
        gate: &mut G,
    ) -> Result<ApplyOutcome, ReconcileError>
    where
        G: ApprovalGate + ?Sized,
    {
        let plan = self.plan(adapter, document)?;
        let client = adapter.name();
        if plan.is_unchanged() {
            tracing::info!(client, "client already up to date");
            return Ok(ApplyOutcome::Unchanged);
        }

        let request = ApprovalRequest {
            client,
            path: &plan.path,
            diff: &plan.diff,
        };
        let approved = gate
            .approve(&request)
            .map_err(|source| ReconcileError::Approval {
                client: client.to_owned(),
                source,
            })?;
        if !approved {
            tracing::info!(client, "change declined");
            return Ok(ApplyOutcome::Declined { diff: plan.diff });
        }

        let backup =
            adapter
                .backup(self.clock.local())
                .map_err(|source| ReconcileError::Backup {
                    client: client.to_owned(),
                    source,
                })?;
        if let Err(source) = adapter.write(&plan.after) {
            tracing::warn!(client, error = %source, "write failed after backup");
            return Err(ReconcileError::Write {
                client: client.to_owned(),
                backup,
                source,
            });
        }

        tracing::info!(
            client,
            added = plan.diff.additions(),
            removed = plan.diff.removals(),
            "reconciled client"
        );
        Ok(ApplyOutcome::Applied {
            path: plan.path,
            backup,
            diff: plan.diff,
        })
    }

    /// Reconciles each adapter in turn.
    ///
    /// A failure is recorded for its client and the remaining clients are
    /// still processed.
    pub fn apply_all<'a, I, G>(
        &self,
        adapters: I,
        document: &CanonicalDocument,
        gate: &mut G,
    ) -> ReconcileSummary
    where
        I: IntoIterator<Item = &'a dyn ClientAdapter>,
        G: ApprovalGate + ?Sized,
    {
        let mut summary = ReconcileSummary::default();
        for adapter in adapters {
            let result = self.apply(adapter, document, gate);
            if let Err(err) = &result {
                tracing::warn!(client = adapter.name(), error = %err, "client reconcile failed");
            }
            summary.record(adapter.name(), adapter.display_name(), result);
        }
        summary
    }
}

/// Copies a backup back over a client's configuration file.
///
/// # Errors
///
/// Returns [`ReconcileError::Adapter`] when the copy fails.
pub fn restore_backup(adapter: &dyn ClientAdapter, backup: &Utf8Path) -> Result<(), ReconcileError> {
    adapter.restore(backup)?;
    Ok(())
}
