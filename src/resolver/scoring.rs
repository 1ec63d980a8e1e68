//! Match scoring and candidate ranking.

use crate::canonical::domain::CanonicalServer;

const EXACT_SCORE: i64 = 100;
const SUBSTRING_BASE: i64 = 80;
const TOKEN_BASE: i64 = 60;

/// A server that matched a query, with its best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The matched server.
    pub server: &'a CanonicalServer,
    /// Highest score over the name, aliases, and tags. Always positive.
    pub score: i64,
}

impl Candidate<'_> {
    /// Returns the matched server's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.server.name().as_str()
    }
}

/// Scores one query against one candidate string.
///
/// Both sides are trimmed and compared case-insensitively. Lengths are
/// counted in characters, so the tighter-match bonus is independent of the
/// encoding width.
///
/// - exact equality scores 100
/// - substring containment scores `80 - (len(candidate) - len(query))`
/// - every whitespace token of the query contained scores
///   `60 - (len(candidate) - len(query))`
/// - anything else, or a blank side, scores 0
#[must_use]
pub fn score_one(query: &str, candidate: &str) -> i64 {
    let needle = query.trim().to_lowercase();
    let haystack = candidate.trim().to_lowercase();
    if needle.is_empty() || haystack.is_empty() {
        return 0;
    }
    if needle == haystack {
        return EXACT_SCORE;
    }

    let length_gap = char_len(&haystack) - char_len(&needle);
    if haystack.contains(&needle) {
        return SUBSTRING_BASE - length_gap;
    }

    let mut tokens = needle.split_whitespace().peekable();
    if tokens.peek().is_some() && tokens.all(|token| haystack.contains(token)) {
        return TOKEN_BASE - length_gap;
    }
    0
}

/// Ranks every server matching `query`.
///
/// Each server's score is the maximum over its name, aliases, and tags.
/// Servers scoring zero or less are excluded. The result is sorted by
/// descending score; ties keep the input order.
#[must_use]
pub fn candidates<'a>(query: &str, servers: &'a [CanonicalServer]) -> Vec<Candidate<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<Candidate<'a>> = servers
        .iter()
        .filter_map(|server| {
            let best = server
                .match_terms()
                .map(|term| score_one(query, term))
                .max()
                .unwrap_or(0);
            (best > 0).then_some(Candidate {
                server,
                score: best,
            })
        })
        .collect();
    ranked.sort_by(|left, right| right.score.cmp(&left.score));
    ranked
}

fn char_len(value: &str) -> i64 {
    i64::try_from(value.chars().count()).unwrap_or(i64::MAX)
}
