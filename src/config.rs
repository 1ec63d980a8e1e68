//! Tunable defaults and their environment overrides.

use crate::canonical::adapters::{JsonFileCanonicalStore, default_document_path};
use crate::canonical::ports::CanonicalStoreResult;
use crate::error::ErrorKind;
use crate::health::domain::HealthPolicy;
use crate::resolver::ResolverPolicy;
use camino::Utf8PathBuf;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Overrides the canonical document path.
pub const CANONICAL_PATH_VAR: &str = "SWITCHBOARD_CANONICAL_PATH";
/// Overrides [`HealthPolicy::max_concurrency`].
pub const HEALTH_CONCURRENCY_VAR: &str = "SWITCHBOARD_HEALTH_CONCURRENCY";
/// Overrides [`ResolverPolicy::ambiguity_threshold`].
pub const AMBIGUITY_THRESHOLD_VAR: &str = "SWITCHBOARD_AMBIGUITY_THRESHOLD";

/// Read access to environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when unset or not UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// An environment override could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    /// Variable name.
    pub key: &'static str,
    /// Rejected value.
    pub value: String,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl ConfigError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

/// Settings shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchboardSettings {
    /// Canonical document path; `None` means the per-user default.
    pub canonical_path: Option<Utf8PathBuf>,
    /// Query resolution tunables.
    pub resolver: ResolverPolicy,
    /// Health engine tunables.
    pub health: HealthPolicy,
}

impl SwitchboardSettings {
    /// Applies overrides from `env` on top of the defaults.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric override does not parse or
    /// is out of range.
    pub fn from_env(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        if let Some(path) = non_blank(env, CANONICAL_PATH_VAR) {
            settings.canonical_path = Some(Utf8PathBuf::from(path));
        }
        if let Some(raw) = non_blank(env, HEALTH_CONCURRENCY_VAR) {
            let limit = parse_number::<usize>(HEALTH_CONCURRENCY_VAR, &raw)?;
            if limit == 0 {
                return Err(ConfigError {
                    key: HEALTH_CONCURRENCY_VAR,
                    value: raw,
                    reason: "must be at least 1",
                });
            }
            settings.health = settings.health.with_max_concurrency(limit);
        }
        if let Some(raw) = non_blank(env, AMBIGUITY_THRESHOLD_VAR) {
            let threshold = parse_number::<i64>(AMBIGUITY_THRESHOLD_VAR, &raw)?;
            if threshold < 0 {
                return Err(ConfigError {
                    key: AMBIGUITY_THRESHOLD_VAR,
                    value: raw,
                    reason: "must not be negative",
                });
            }
            settings.resolver = settings.resolver.with_ambiguity_threshold(threshold);
        }
        Ok(settings)
    }

    /// Sets the canonical document path.
    #[must_use]
    pub fn with_canonical_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.canonical_path = Some(path.into());
        self
    }

    /// Replaces the resolver policy.
    #[must_use]
    pub const fn with_resolver(mut self, resolver: ResolverPolicy) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the health policy.
    #[must_use]
    pub const fn with_health(mut self, health: HealthPolicy) -> Self {
        self.health = health;
        self
    }

    /// Opens the canonical store these settings point at.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalStoreError::LocationUnavailable`] when no path is
    /// configured and the per-user default cannot be determined.
    ///
    /// [`CanonicalStoreError::LocationUnavailable`]:
    ///     crate::canonical::ports::CanonicalStoreError::LocationUnavailable
    pub fn canonical_store<C>(&self, clock: Arc<C>) -> CanonicalStoreResult<JsonFileCanonicalStore<C>>
    where
        C: Clock + Send + Sync,
    {
        let path = match &self.canonical_path {
            Some(path) => path.clone(),
            None => default_document_path()?,
        };
        Ok(JsonFileCanonicalStore::new(path, clock))
    }
}

fn non_blank(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError {
        key,
        value: raw.to_owned(),
        reason: "expected a whole number",
    })
}
