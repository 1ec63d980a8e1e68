//! Command surface consumed by a CLI or TUI front end.

use super::{
    ApplyReport, HealthRun, OperationError, OperationResult, ToggleMode, ToggleReport,
};
use crate::canonical::domain::{CanonicalDocument, CanonicalServer};
use crate::canonical::ports::CanonicalStore;
use crate::canonical::services::ProfileService;
use crate::client::ports::ClientAdapter;
use crate::client::services::{ALL_CLIENTS, ClientRegistry};
use crate::config::SwitchboardSettings;
use crate::error::ErrorKind;
use crate::health::services::{HealthEngine, disable_failing};
use crate::reconcile::{
    ApprovalGate, ClientStatus, ReconcileError, ReconcileSummary, Reconciler, client_status,
    restore_backup,
};
use crate::resolver::{Disambiguator, ResolverPolicy, resolve};
use camino::Utf8Path;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Entry point for every user-facing operation.
///
/// Each call loads the canonical document, applies at most one change,
/// saves it whole, and then reconciles the selected clients. A client of
/// `None` or `"all"` means every detected client.
pub struct Switchboard<S, C>
where
    S: CanonicalStore,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    clients: ClientRegistry,
    profiles: ProfileService<S>,
    reconciler: Reconciler<C>,
    health: HealthEngine<C>,
    resolver: ResolverPolicy,
    clock: Arc<C>,
}

impl<S, C> Switchboard<S, C>
where
    S: CanonicalStore,
    C: Clock + Send + Sync + 'static,
{
    /// Wires the services together.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        clients: ClientRegistry,
        settings: &SwitchboardSettings,
        clock: Arc<C>,
    ) -> Self {
        Self {
            profiles: ProfileService::new(Arc::clone(&store)),
            reconciler: Reconciler::new(Arc::clone(&clock)),
            health: HealthEngine::new(settings.health, Arc::clone(&clock)),
            resolver: settings.resolver,
            store,
            clients,
            clock,
        }
    }

    /// Replaces the health engine, for custom probes.
    #[must_use]
    pub fn with_health_engine(mut self, engine: HealthEngine<C>) -> Self {
        self.health = engine;
        self
    }

    /// Returns the canonical store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the client registry.
    #[must_use]
    pub const fn clients(&self) -> &ClientRegistry {
        &self.clients
    }

    /// Returns the profile service.
    #[must_use]
    pub const fn profiles(&self) -> &ProfileService<S> {
        &self.profiles
    }

    /// Resolves `query` and marks the server enabled.
    ///
    /// # Errors
    ///
    /// See [`Switchboard::set_state`].
    pub fn enable<D, G>(
        &self,
        query: &str,
        client: Option<&str>,
        assume_yes: bool,
        disambiguator: &mut D,
        gate: &mut G,
    ) -> OperationResult<ToggleReport>
    where
        D: Disambiguator + ?Sized,
        G: ApprovalGate + ?Sized,
    {
        self.set_state(ToggleMode::Enable, query, client, assume_yes, disambiguator, gate)
    }

    /// Resolves `query` and marks the server disabled.
    ///
    /// # Errors
    ///
    /// See [`Switchboard::set_state`].
    pub fn disable<D, G>(
        &self,
        query: &str,
        client: Option<&str>,
        assume_yes: bool,
        disambiguator: &mut D,
        gate: &mut G,
    ) -> OperationResult<ToggleReport>
    where
        D: Disambiguator + ?Sized,
        G: ApprovalGate + ?Sized,
    {
        self.set_state(ToggleMode::Disable, query, client, assume_yes, disambiguator, gate)
    }

    /// Resolves `query` and inverts the server's enabled flag.
    ///
    /// # Errors
    ///
    /// See [`Switchboard::set_state`].
    pub fn toggle<D, G>(
        &self,
        query: &str,
        client: Option<&str>,
        assume_yes: bool,
        disambiguator: &mut D,
        gate: &mut G,
    ) -> OperationResult<ToggleReport>
    where
        D: Disambiguator + ?Sized,
        G: ApprovalGate + ?Sized,
    {
        self.set_state(ToggleMode::Toggle, query, client, assume_yes, disambiguator, gate)
    }

    /// Resolves `query`, updates the canonical flag, and reconciles.
    ///
    /// The document is only saved when the flag changes, but clients are
    /// always reconciled so that drift is repaired either way.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError`] for unknown clients, resolution
    /// failures, or canonical load/save failures. Per-client failures are
    /// recorded in the report.
    pub fn set_state<D, G>(
        &self,
        mode: ToggleMode,
        query: &str,
        client: Option<&str>,
        assume_yes: bool,
        disambiguator: &mut D,
        gate: &mut G,
    ) -> OperationResult<ToggleReport>
    where
        D: Disambiguator + ?Sized,
        G: ApprovalGate + ?Sized,
    {
        let targets = self.clients.targets(client)?;
        let mut document = self.store.load()?;

        let chosen = resolve(
            query,
            document.servers(),
            assume_yes,
            &self.resolver,
            disambiguator,
        )?;
        let server = chosen.name().clone();
        let current = chosen.is_enabled();
        let enabled = mode.apply(current);
        let changed = enabled != current;

        if changed {
            document.set_enabled(server.as_str(), enabled)?;
            self.store.save(&mut document)?;
            tracing::info!(server = %server, %mode, enabled, "updated canonical server");
        } else {
            tracing::debug!(server = %server, %mode, enabled, "canonical server already in requested state");
        }

        if targets.is_empty() {
            tracing::warn!(server = %server, "no installed clients to reconcile");
        }
        let reconcile = self.reconcile(targets, &document, gate);
        Ok(ToggleReport {
            server,
            enabled,
            changed,
            reconcile,
        })
    }

    /// Reports how each client compares with the canonical document.
    ///
    /// With no client named, every registered client is reported whether
    /// or not it is installed, except those with no location on this OS.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError`] for unknown clients, canonical load
    /// failures, or client read failures.
    pub fn status(&self, client: Option<&str>) -> OperationResult<Vec<ClientStatus>> {
        let document = self.store.load()?;
        let named = client
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(ALL_CLIENTS));

        if let Some(name) = named {
            let targets = self.clients.targets(Some(name))?;
            return targets
                .into_iter()
                .map(|adapter| client_status(adapter, &document).map_err(OperationError::from))
                .collect();
        }

        let mut statuses = Vec::new();
        for adapter in self.clients.all() {
            match client_status(adapter, &document) {
                Ok(status) => statuses.push(status),
                Err(err) if err.kind() == ErrorKind::UnsupportedPlatform => {
                    tracing::debug!(client = adapter.name(), error = %err, "skipping client");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(statuses)
    }

    /// Runs health checks and optionally disables failing servers.
    ///
    /// With a client named, the canonical servers present in that client's
    /// file are checked; otherwise every enabled server is. `filter`
    /// narrows the selection by name, alias, or tag. With `fix`, failing
    /// servers are disabled and the document is saved; clients are not
    /// touched until the next [`Switchboard::apply`].
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoServers`] when the selection is empty,
    /// or client and canonical store failures.
    pub async fn health(
        &self,
        client: Option<&str>,
        filter: Option<&str>,
        fix: bool,
        cancel: &CancellationToken,
    ) -> OperationResult<HealthRun> {
        let mut document = self.store.load()?;
        let servers = self.health_targets(&document, client, filter)?;
        if servers.is_empty() {
            return Err(OperationError::NoServers);
        }

        let report = self.health.report(&servers, cancel).await;
        let disabled = if fix {
            let flipped = disable_failing(&mut document, &report.results);
            if !flipped.is_empty() {
                self.store.save(&mut document)?;
                tracing::info!(
                    disabled = flipped.len(),
                    "saved health fixes; apply to update clients"
                );
            }
            flipped
        } else {
            Vec::new()
        };
        Ok(HealthRun { report, disabled })
    }

    /// Optionally applies a profile, then reconciles clients.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoClients`] when no client is named and
    /// none is installed, or profile, client, and store failures.
    pub fn apply<G>(
        &self,
        client: Option<&str>,
        profile: Option<&str>,
        gate: &mut G,
    ) -> OperationResult<ApplyReport>
    where
        G: ApprovalGate + ?Sized,
    {
        let targets = self.clients.targets(client)?;
        if targets.is_empty() {
            return Err(OperationError::NoClients);
        }

        let (document, application) = match profile {
            Some(name) => {
                let (saved, applied) = self.profiles.apply(name)?;
                (saved, Some(applied))
            }
            None => (self.store.load()?, None),
        };

        let reconcile = self.reconcile(targets, &document, gate);
        Ok(ApplyReport {
            profile: application,
            reconcile,
        })
    }

    /// Copies a backup back over one client's configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError`] for unknown clients or copy failures.
    pub fn restore(&self, client: &str, backup: &Utf8Path) -> OperationResult<()> {
        for adapter in self.clients.targets(Some(client))? {
            restore_backup(adapter, backup)?;
        }
        Ok(())
    }

    /// Lists profiles keyed by name.
    ///
    /// # Errors
    ///
    /// Returns store failures.
    pub fn list_profiles(&self) -> OperationResult<BTreeMap<String, Vec<String>>> {
        Ok(self.profiles.list()?)
    }

    /// Creates a profile from explicit members, or from the currently
    /// enabled servers when `members` is `None`.
    ///
    /// # Errors
    ///
    /// Returns profile validation or store failures.
    pub fn create_profile(&self, name: &str, members: Option<Vec<String>>) -> OperationResult<()> {
        match members {
            Some(explicit) => self.profiles.create(name, explicit)?,
            None => self.profiles.create_from_current(name)?,
        }
        Ok(())
    }

    /// Replaces a profile's members.
    ///
    /// # Errors
    ///
    /// Returns profile validation or store failures.
    pub fn update_profile(&self, name: &str, members: Vec<String>) -> OperationResult<()> {
        Ok(self.profiles.update(name, members)?)
    }

    /// Deletes a profile.
    ///
    /// # Errors
    ///
    /// Returns profile lookup or store failures.
    pub fn delete_profile(&self, name: &str) -> OperationResult<()> {
        Ok(self.profiles.delete(name)?)
    }

    fn reconcile<G>(
        &self,
        targets: Vec<&dyn ClientAdapter>,
        document: &CanonicalDocument,
        gate: &mut G,
    ) -> ReconcileSummary
    where
        G: ApprovalGate + ?Sized,
    {
        let summary = self.reconciler.apply_all(targets, document, gate);
        tracing::info!(
            applied = summary.applied().count(),
            unchanged = summary.unchanged().count(),
            declined = summary.declined().count(),
            failed = summary.failed().count(),
            at = %self.clock.utc(),
            "reconcile finished"
        );
        summary
    }

    fn health_targets(
        &self,
        document: &CanonicalDocument,
        client: Option<&str>,
        filter: Option<&str>,
    ) -> OperationResult<Vec<CanonicalServer>> {
        let named = client
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(ALL_CLIENTS));

        let mut selected: Vec<CanonicalServer> = match named {
            Some(name) => {
                let mut present = Vec::new();
                for adapter in self.clients.targets(Some(name))? {
                    let state = adapter.load().map_err(ReconcileError::from)?;
                    present.extend(
                        document
                            .servers()
                            .iter()
                            .filter(|server| state.contains(server.name().as_str()))
                            .cloned(),
                    );
                }
                present
            }
            None => document.enabled_servers().cloned().collect(),
        };

        if let Some(needle) = filter.filter(|needle| !needle.trim().is_empty()) {
            selected.retain(|server| server.matches_filter(needle));
        }
        Ok(selected)
    }
}
