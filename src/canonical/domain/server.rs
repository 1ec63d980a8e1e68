//! Canonical server definition and its optional health and remediation policies.

use super::ServerName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_FAILURE_THRESHOLD: u32 = 3;
const DEFAULT_WINDOW_HOURS: u32 = 24;
const DEFAULT_COOLDOWN_HOURS: u32 = 24;

/// Liveness check settings attached to a canonical server.
///
/// A zero `timeout_ms` or `retries` means "use the engine default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckSpec {
    /// Check type: `stdio`, `http`, or `tcp`.
    #[serde(rename = "type")]
    pub check_type: String,
    /// URL for `http` checks, or `host:port` (optionally `tcp://`) for `tcp`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Overall deadline for all attempts, in milliseconds.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub timeout_ms: u64,
    /// Number of attempts.
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub retries: u32,
}

impl HealthCheckSpec {
    /// Creates a check of the given type with engine-default timing.
    #[must_use]
    pub fn new(check_type: impl Into<String>) -> Self {
        Self {
            check_type: check_type.into(),
            ..Self::default()
        }
    }

    /// Sets the probe URL or address.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the overall timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the number of attempts.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

/// Auto-remediation settings for a canonical server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationPolicy {
    /// Whether failing checks may disable the server.
    #[serde(default)]
    pub auto_disable: bool,
    /// Failures tolerated within the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<u32>,
    /// Failure counting window, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_hours: Option<u32>,
    /// Minimum time between automatic changes, in hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_hours: Option<u32>,
}

impl RemediationPolicy {
    /// Returns the failure threshold, defaulting to 3.
    #[must_use]
    pub fn effective_failure_threshold(&self) -> u32 {
        self.failure_threshold.unwrap_or(DEFAULT_FAILURE_THRESHOLD)
    }

    /// Returns the window length, defaulting to 24 hours.
    #[must_use]
    pub fn effective_window_hours(&self) -> u32 {
        self.window_hours.unwrap_or(DEFAULT_WINDOW_HOURS)
    }

    /// Returns the cooldown length, defaulting to 24 hours.
    #[must_use]
    pub fn effective_cooldown_hours(&self) -> u32 {
        self.cooldown_hours.unwrap_or(DEFAULT_COOLDOWN_HOURS)
    }
}

/// One named server integration owned by the canonical document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalServer {
    name: ServerName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(default)]
    command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transport: Option<String>,
    #[serde(default)]
    enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    health_check: Option<HealthCheckSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    policy: Option<RemediationPolicy>,
}

impl CanonicalServer {
    /// Creates a disabled server that runs `command`.
    #[must_use]
    pub fn new(name: ServerName, command: impl Into<String>) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            tags: Vec::new(),
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            transport: None,
            enabled: false,
            health_check: None,
            policy: None,
        }
    }

    /// Replaces the alternate names used for matching.
    #[must_use]
    pub fn with_aliases(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.aliases = values.into_iter().collect();
        self
    }

    /// Replaces the free-text tags.
    #[must_use]
    pub fn with_tags(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.tags = values.into_iter().collect();
        self
    }

    /// Replaces command-line arguments.
    #[must_use]
    pub fn with_args(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.args = values.into_iter().collect();
        self
    }

    /// Replaces process environment variables.
    #[must_use]
    pub fn with_env(mut self, values: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env = values.into_iter().collect();
        self
    }

    /// Sets the advisory transport hint.
    #[must_use]
    pub fn with_transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// Attaches a health check.
    #[must_use]
    pub fn with_health_check(mut self, spec: HealthCheckSpec) -> Self {
        self.health_check = Some(spec);
        self
    }

    /// Attaches a remediation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RemediationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the initial enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns the server name.
    #[must_use]
    pub const fn name(&self) -> &ServerName {
        &self.name
    }

    /// Returns alternate names.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Returns tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the executable command.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns command-line arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns environment variables.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the transport hint.
    #[must_use]
    pub fn transport(&self) -> Option<&str> {
        self.transport.as_deref()
    }

    /// Returns whether the server should be present in clients.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the configured health check.
    #[must_use]
    pub const fn health_check(&self) -> Option<&HealthCheckSpec> {
        self.health_check.as_ref()
    }

    /// Returns the remediation policy.
    #[must_use]
    pub const fn policy(&self) -> Option<&RemediationPolicy> {
        self.policy.as_ref()
    }

    /// Sets the enabled flag.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Inverts the enabled flag and returns the new value.
    pub const fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Returns the name followed by aliases and tags.
    pub fn match_terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .chain(self.tags.iter().map(String::as_str))
    }

    /// Returns whether the name, an alias, or a tag contains `filter`,
    /// ignoring case.
    #[must_use]
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        self.match_terms()
            .any(|term| term.to_lowercase().contains(&needle))
    }
}

const fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

const fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}
