//! Match priority classification for candidate text fields
//!
//! Every domain ranks with the same tiers: a nickname hit beats an exact
//! title, which beats a prefix, which beats a second-word prefix. Anything
//! weaker is `Other` and never reaches ranked output.

use serde::{Deserialize, Serialize};

/// Match quality tier (lower = better)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchPriority {
    NicknameMatch,
    ExactMatch,
    StartsWith,
    SecondWordStartsWith,
    Other,
}

impl MatchPriority {
    /// True for every tier that belongs in ranked results
    #[inline]
    pub fn is_match(self) -> bool {
        self != MatchPriority::Other
    }
}

/// Trim and lowercase. `to_lowercase` is locale-invariant in Rust.
#[inline]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A query that passed the minimum-length gate, already normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    /// Normalize `raw` and apply the minimum length gate.
    ///
    /// Returns None for blank queries and for queries shorter than
    /// `min_len` characters after trimming.
    pub fn parse(raw: &str, min_len: usize) -> Option<Self> {
        let text = normalize(raw);
        if text.is_empty() || text.chars().count() < min_len {
            return None;
        }
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Some(SearchQuery { text, tokens })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Classify one already-normalized field against an already-normalized query.
pub(crate) fn field_priority(field: &str, query: &str) -> MatchPriority {
    if query.is_empty() || field.is_empty() {
        return MatchPriority::Other;
    }
    if field == query {
        return MatchPriority::ExactMatch;
    }
    if field.starts_with(query) {
        return MatchPriority::StartsWith;
    }
    if let Some((_, rest)) = field.split_once(char::is_whitespace) {
        if rest.trim_start().starts_with(query) {
            return MatchPriority::SecondWordStartsWith;
        }
    }
    MatchPriority::Other
}

/// Multi-word queries whose every token appears somewhere in the field.
fn tokens_all_present(field: &str, tokens: &[String]) -> bool {
    tokens.len() > 1 && tokens.iter().all(|token| field.contains(token.as_str()))
}

/// Best tier across already-normalized fields.
pub(crate) fn best_field_priority<'a, I>(
    fields: I,
    query: &SearchQuery,
    token_aware: bool,
) -> MatchPriority
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = MatchPriority::Other;
    for field in fields {
        let mut tier = field_priority(field, query.as_str());
        if tier == MatchPriority::Other && token_aware && tokens_all_present(field, query.tokens())
        {
            tier = MatchPriority::SecondWordStartsWith;
        }
        best = best.min(tier);
        if best == MatchPriority::ExactMatch {
            break;
        }
    }
    best
}

/// Nickname check on an already-normalized alias.
#[inline]
pub(crate) fn nickname_matches(nickname: Option<&str>, query: &str) -> bool {
    match nickname {
        Some(nick) => !nick.is_empty() && !query.is_empty() && nick.contains(query),
        None => false,
    }
}

/// Compute the priority of a candidate against a query.
///
/// Fields and nickname are normalized here; no minimum length is applied,
/// so callers that pre-validate the query (or deliberately allow short
/// nickname lookups) get a plain classification. A blank query is `Other`.
pub fn priority(fields: &[&str], nickname: Option<&str>, query: &str) -> MatchPriority {
    match SearchQuery::parse(query, 1) {
        Some(q) => classify(fields, nickname, &q, false),
        None => MatchPriority::Other,
    }
}

/// Token-aware variant of [`priority`] for label + long-description domains.
pub fn priority_with_tokens(fields: &[&str], nickname: Option<&str>, query: &str) -> MatchPriority {
    match SearchQuery::parse(query, 1) {
        Some(q) => classify(fields, nickname, &q, true),
        None => MatchPriority::Other,
    }
}

fn classify(
    fields: &[&str],
    nickname: Option<&str>,
    query: &SearchQuery,
    token_aware: bool,
) -> MatchPriority {
    let nickname = nickname.map(normalize);
    if nickname_matches(nickname.as_deref(), query.as_str()) {
        return MatchPriority::NicknameMatch;
    }
    let normalized: Vec<String> = fields.iter().map(|f| normalize(f)).collect();
    best_field_priority(normalized.iter().map(String::as_str), query, token_aware)
}

#[cfg(test)]
#[path = "priority_tests.rs"]
mod tests;
