//! Strategies for choosing between nearly tied candidates.

use super::{
    Candidate, ResolveError, Resolution, ResolverPolicy, parse_selection, select_best,
};
use crate::canonical::domain::CanonicalServer;
use std::io::{BufRead, Write};

/// Chooses one entry from an ambiguous band.
pub trait Disambiguator {
    /// Returns the index of the chosen candidate within `band`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when no choice can be made.
    fn choose(&mut self, query: &str, band: &[Candidate<'_>]) -> Result<usize, ResolveError>;
}

/// Always picks the best-scored candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl Disambiguator for FirstCandidate {
    fn choose(&mut self, _query: &str, _band: &[Candidate<'_>]) -> Result<usize, ResolveError> {
        Ok(0)
    }
}

/// Refuses to choose, surfacing [`ResolveError::Ambiguous`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAmbiguous;

impl Disambiguator for RejectAmbiguous {
    fn choose(&mut self, query: &str, band: &[Candidate<'_>]) -> Result<usize, ResolveError> {
        Err(ResolveError::Ambiguous {
            query: query.trim().to_owned(),
            candidates: band.iter().map(|c| c.name().to_owned()).collect(),
        })
    }
}

/// Numbered-menu prompt over any reader and writer.
///
/// The default choice is the first entry.
#[derive(Debug)]
pub struct PromptDisambiguator<R, W> {
    input: R,
    output: W,
}

impl<R, W> PromptDisambiguator<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a prompt reading choices from `input` and printing the menu
    /// to `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render_menu(&mut self, query: &str, band: &[Candidate<'_>]) -> std::io::Result<()> {
        writeln!(self.output, "Multiple matches found for \"{}\":", query.trim())?;
        for (position, candidate) in band.iter().enumerate() {
            write!(self.output, "  {}) {}", position + 1, candidate.name())?;
            let details = describe(candidate.server);
            if !details.is_empty() {
                write!(self.output, " ({details})")?;
            }
            writeln!(self.output, " [score: {}]", candidate.score)?;
        }
        write!(self.output, "Select option [1]: ")?;
        self.output.flush()
    }
}

impl<R, W> Disambiguator for PromptDisambiguator<R, W>
where
    R: BufRead,
    W: Write,
{
    fn choose(&mut self, query: &str, band: &[Candidate<'_>]) -> Result<usize, ResolveError> {
        self.render_menu(query, band)?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        parse_selection(&line, band.len())
    }
}

fn describe(server: &CanonicalServer) -> String {
    let mut parts = Vec::new();
    if !server.aliases().is_empty() {
        parts.push(format!("aliases: {}", server.aliases().join(", ")));
    }
    if !server.tags().is_empty() {
        parts.push(format!("tags: {}", server.tags().join(", ")));
    }
    parts.join(", ")
}

/// Resolves `query` to exactly one server, consulting `disambiguator` only
/// when the band holds more than one candidate.
///
/// # Errors
///
/// Returns [`ResolveError::NoMatch`], or whatever the disambiguator
/// reports. An out-of-range index from the disambiguator is reported as
/// [`ResolveError::InvalidSelection`].
pub fn resolve<'a, D>(
    query: &str,
    servers: &'a [CanonicalServer],
    assume_yes: bool,
    policy: &ResolverPolicy,
    disambiguator: &mut D,
) -> Result<&'a CanonicalServer, ResolveError>
where
    D: Disambiguator + ?Sized,
{
    match select_best(query, servers, assume_yes, policy)? {
        Resolution::Resolved(candidate) => Ok(candidate.server),
        Resolution::Ambiguous(band) => {
            let index = disambiguator.choose(query, &band)?;
            band.get(index)
                .map(|candidate| candidate.server)
                .ok_or_else(|| ResolveError::InvalidSelection {
                    input: (index + 1).to_string(),
                    count: band.len(),
                })
        }
    }
}
