//! Timing and concurrency defaults for the health engine.

use std::time::Duration;

/// Tunable knobs applied when a server's check leaves them unset.
///
/// The stdio grace period is a heuristic: a process that is still alive
/// after it has elapsed is assumed to have started correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    /// Overall deadline when `timeoutMs` is zero or absent.
    pub default_timeout: Duration,
    /// Attempts when `retries` is zero or absent.
    pub default_retries: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
    /// How long a stdio process must survive to count as started.
    pub stdio_grace: Duration,
    /// Maximum checks in flight during a batch.
    pub max_concurrency: usize,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(5),
            default_retries: 1,
            retry_delay: Duration::from_millis(500),
            stdio_grace: Duration::from_secs(1),
            max_concurrency: 10,
        }
    }
}

impl HealthPolicy {
    /// Sets the default overall timeout.
    #[must_use]
    pub const fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Sets the pause between attempts.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the stdio grace period.
    #[must_use]
    pub const fn with_stdio_grace(mut self, grace: Duration) -> Self {
        self.stdio_grace = grace;
        self
    }

    /// Sets the batch concurrency cap; zero is raised to one.
    #[must_use]
    pub const fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = if limit == 0 { 1 } else { limit };
        self
    }

    /// Resolves the deadline for a configured `timeoutMs`.
    #[must_use]
    pub const fn timeout_for(&self, timeout_ms: u64) -> Duration {
        if timeout_ms == 0 {
            self.default_timeout
        } else {
            Duration::from_millis(timeout_ms)
        }
    }

    /// Resolves the attempt count for a configured `retries`.
    #[must_use]
    pub const fn attempts_for(&self, retries: u32) -> u32 {
        if retries > 0 {
            retries
        } else if self.default_retries > 0 {
            self.default_retries
        } else {
            1
        }
    }
}
