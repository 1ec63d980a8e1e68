//! Resolver errors.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while turning a query into a single server.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No server name, alias, or tag matched.
    #[error("no server matches '{query}'")]
    NoMatch {
        /// The trimmed query.
        query: String,
    },

    /// Several servers matched and the caller declined to choose.
    #[error("'{query}' is ambiguous: {}", candidates.join(", "))]
    Ambiguous {
        /// The trimmed query.
        query: String,
        /// Names of the tied candidates, best first.
        candidates: Vec<String>,
    },

    /// A menu choice was not a number between 1 and `count`.
    #[error("invalid selection '{input}': expected a number from 1 to {count}")]
    InvalidSelection {
        /// The rejected input.
        input: String,
        /// Number of entries on offer.
        count: usize,
    },

    /// Reading the choice or writing the menu failed.
    #[error("failed to prompt for a selection: {0}")]
    Prompt(#[from] std::io::Error),
}

impl ResolveError {
    /// Maps the error onto the crate taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoMatch { .. } => ErrorKind::NotFound,
            Self::Ambiguous { .. } => ErrorKind::Ambiguous,
            Self::InvalidSelection { .. } => ErrorKind::InvalidInput,
            Self::Prompt(_) => ErrorKind::IoFailure,
        }
    }
}
