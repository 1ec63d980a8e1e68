//! Fuzzy resolution of free-text queries to canonical servers.
//!
//! Resolution has two stages. [`candidates`] scores every server against
//! the query and ranks the matches. [`select_best`] then bands the ranking:
//! when the top candidate is clear of the rest by more than the policy
//! threshold it is returned directly, otherwise the nearly tied band is
//! returned as [`Resolution::Ambiguous`] for the caller to settle with a
//! [`Disambiguator`].

mod disambiguate;
mod error;
mod scoring;
mod selection;

pub use disambiguate::{
    Disambiguator, FirstCandidate, PromptDisambiguator, RejectAmbiguous, resolve,
};
pub use error::ResolveError;
pub use scoring::{Candidate, candidates, score_one};
pub use selection::{
    DEFAULT_AMBIGUITY_THRESHOLD, Resolution, ResolverPolicy, parse_selection, select_best,
};
