//! Ambiguity banding over ranked candidates.

use super::{Candidate, ResolveError, candidates};
use crate::canonical::domain::CanonicalServer;

/// Default width of the ambiguity band, in score points.
pub const DEFAULT_AMBIGUITY_THRESHOLD: i64 = 5;

/// Tunables for query resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Candidates within this many points of the top score are treated as
    /// tied with it.
    pub ambiguity_threshold: i64,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self {
            ambiguity_threshold: DEFAULT_AMBIGUITY_THRESHOLD,
        }
    }
}

impl ResolverPolicy {
    /// Sets the ambiguity band width.
    #[must_use]
    pub const fn with_ambiguity_threshold(mut self, threshold: i64) -> Self {
        self.ambiguity_threshold = threshold;
        self
    }
}

/// Result of resolving a query without user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly one server is the clear match.
    Resolved(Candidate<'a>),
    /// Several servers are nearly tied; the caller must choose.
    ///
    /// Holds at least two candidates in descending score order.
    Ambiguous(Vec<Candidate<'a>>),
}

/// Resolves `query` to one server or an ambiguous band.
///
/// With `assume_yes` the top candidate is returned even when others are
/// close to it. This never blocks.
///
/// # Errors
///
/// Returns [`ResolveError::NoMatch`] when nothing matches.
pub fn select_best<'a>(
    query: &str,
    servers: &'a [CanonicalServer],
    assume_yes: bool,
    policy: &ResolverPolicy,
) -> Result<Resolution<'a>, ResolveError> {
    let ranked = candidates(query, servers);
    let Some(top) = ranked.first().copied() else {
        return Err(ResolveError::NoMatch {
            query: query.trim().to_owned(),
        });
    };

    if ranked.len() == 1 || assume_yes {
        tracing::debug!(query, server = top.name(), score = top.score, "resolved query");
        return Ok(Resolution::Resolved(top));
    }

    let band: Vec<Candidate<'a>> = ranked
        .into_iter()
        .take_while(|candidate| top.score - candidate.score <= policy.ambiguity_threshold)
        .collect();

    match band.as_slice() {
        [only] => {
            tracing::debug!(query, server = only.name(), score = only.score, "clear winner");
            Ok(Resolution::Resolved(*only))
        }
        _ => {
            tracing::debug!(query, tied = band.len(), "query is ambiguous");
            Ok(Resolution::Ambiguous(band))
        }
    }
}

/// Parses a 1-based menu choice into a 0-based index.
///
/// Blank input selects the first entry.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidSelection`] for non-numeric or
/// out-of-range input.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, ResolveError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return if count == 0 {
            Err(ResolveError::InvalidSelection {
                input: String::new(),
                count,
            })
        } else {
            Ok(0)
        };
    }

    match trimmed.parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Ok(choice - 1),
        _ => Err(ResolveError::InvalidSelection {
            input: trimmed.to_owned(),
            count,
        }),
    }
}
