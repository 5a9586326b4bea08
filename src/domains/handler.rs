//! Generic per-domain search handler
//!
//! Ranking pipeline for one query:
//! 1. gate the query (blank / too short -> nothing)
//! 2. take one cache snapshot and one customization snapshot
//! 3. drop excluded identities and domain disqualifications
//! 4. classify with the shared priority tiers, drop `Other`
//! 5. sort by (tier, lowercase display name, identity) and cap

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use super::cache::{CandidateCache, IndexedCandidate, RefreshTicket};
use super::types::{IdentityKey, Searchable};
use crate::customization::{CustomizationOverlay, DomainCustomizations};
use crate::error::SearchKitError;
use crate::search::{best_field_priority, nickname_matches, normalize, MatchPriority, SearchQuery};

/// Platform data provider for one domain (package manager, contacts
/// provider, media store, settings catalogue, shortcut service).
pub trait CandidateSource<T>: Send + Sync {
    fn load_candidates(&self) -> anyhow::Result<Vec<T>>;
}

impl<T, F> CandidateSource<T> for F
where
    F: Fn() -> anyhow::Result<Vec<T>> + Send + Sync,
{
    fn load_candidates(&self) -> anyhow::Result<Vec<T>> {
        self()
    }
}

/// Domain-specific rules layered on top of the shared ranking
pub trait DomainFilter<T>: Send + Sync {
    /// Candidates that must never appear in results for any query
    fn is_disqualified(&self, _candidate: &T) -> bool {
        false
    }

    /// Whether multi-word queries may match tokens independently
    fn token_aware(&self) -> bool {
        false
    }
}

/// A ranked result with the tier that placed it
#[derive(Debug, Clone)]
pub struct RankedMatch<T> {
    pub item: Arc<T>,
    pub priority: MatchPriority,
}

/// Everything a domain section needs for one query
#[derive(Debug, Clone)]
pub struct DomainState<T> {
    pub pinned: Vec<Arc<T>>,
    pub excluded: Vec<Arc<T>>,
    pub results: Vec<Arc<T>>,
}

pub struct SearchHandler<T, F> {
    cache: Arc<CandidateCache<T>>,
    overlay: Arc<CustomizationOverlay>,
    filter: RwLock<F>,
    min_query_length: usize,
    limit: Option<usize>,
}

impl<T: Searchable, F: DomainFilter<T>> SearchHandler<T, F> {
    pub fn new(
        overlay: Arc<CustomizationOverlay>,
        filter: F,
        min_query_length: usize,
        limit: Option<usize>,
    ) -> Self {
        SearchHandler {
            cache: Arc::new(CandidateCache::new()),
            overlay,
            filter: RwLock::new(filter),
            min_query_length,
            limit,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Ranked results for `query`; empty when the cache is not loaded yet
    pub fn search(&self, query: &str) -> Vec<Arc<T>> {
        self.search_ranked(query)
            .into_iter()
            .map(|m| m.item)
            .collect()
    }

    /// Like [`search`](Self::search) but keeps the match tier
    #[instrument(name = "domain_search", skip(self, query), fields(domain = %T::DOMAIN, query_len = query.len()))]
    pub fn search_ranked(&self, query: &str) -> Vec<RankedMatch<T>> {
        let Some(query) = SearchQuery::parse(query, self.min_query_length) else {
            return Vec::new();
        };
        let candidates = self.cache.snapshot();
        if candidates.is_empty() {
            debug!(loaded = self.cache.is_loaded(), "No candidates cached");
            return Vec::new();
        }
        let customizations = self.overlay.snapshot(T::DOMAIN);
        let results = self.rank(&candidates, &customizations, &query);
        debug!(
            candidate_count = candidates.len(),
            result_count = results.len(),
            "Search complete"
        );
        results
    }

    /// Pinned, excluded and ranked results from a single customization read
    pub fn state(&self, query: &str) -> DomainState<T> {
        let candidates = self.cache.snapshot();
        let customizations = self.overlay.snapshot(T::DOMAIN);

        let results = match SearchQuery::parse(query, self.min_query_length) {
            Some(q) if !candidates.is_empty() => self
                .rank(&candidates, &customizations, &q)
                .into_iter()
                .map(|m| m.item)
                .collect(),
            _ => Vec::new(),
        };

        DomainState {
            pinned: collect_pinned(&candidates, &customizations),
            excluded: collect_alphabetical(&candidates, |key| customizations.excluded.contains(key)),
            results,
        }
    }

    /// Pinned candidates, alphabetical, never including excluded ones
    pub fn pinned(&self) -> Vec<Arc<T>> {
        let customizations = self.overlay.snapshot(T::DOMAIN);
        collect_pinned(&self.cache.snapshot(), &customizations)
    }

    /// Excluded candidates, alphabetical, for review and restore
    pub fn excluded(&self) -> Vec<Arc<T>> {
        let customizations = self.overlay.snapshot(T::DOMAIN);
        collect_alphabetical(&self.cache.snapshot(), |key| {
            customizations.excluded.contains(key)
        })
    }

    /// Look up a cached candidate by identity
    pub fn get(&self, key: &IdentityKey) -> Option<Arc<T>> {
        self.cache
            .snapshot()
            .iter()
            .find(|c| &c.key == key)
            .map(|c| Arc::clone(&c.item))
    }

    fn rank(
        &self,
        candidates: &[IndexedCandidate<T>],
        customizations: &DomainCustomizations,
        query: &SearchQuery,
    ) -> Vec<RankedMatch<T>> {
        let filter = self.filter.read();
        let token_aware = filter.token_aware();

        // Normalize each alias once per call, not once per candidate
        let nicknames: HashMap<&IdentityKey, String> = customizations
            .nicknames
            .iter()
            .map(|(key, nickname)| (key, normalize(nickname)))
            .collect();

        let mut ranked: Vec<(MatchPriority, &IndexedCandidate<T>)> = Vec::new();
        for candidate in candidates {
            if customizations.excluded.contains(&candidate.key) {
                continue;
            }
            if filter.is_disqualified(&candidate.item) {
                continue;
            }
            let nickname = nicknames.get(&candidate.key).map(String::as_str);
            let tier = if nickname_matches(nickname, query.as_str()) {
                MatchPriority::NicknameMatch
            } else {
                best_field_priority(candidate.fields.iter().map(String::as_str), query, token_aware)
            };
            if tier.is_match() {
                ranked.push((tier, candidate));
            }
        }

        ranked.sort_by(|a, b| match a.0.cmp(&b.0) {
            Ordering::Equal => match a.1.sort_name.cmp(&b.1.sort_name) {
                Ordering::Equal => a.1.key.cmp(&b.1.key),
                other => other,
            },
            other => other,
        });
        if let Some(limit) = self.limit {
            ranked.truncate(limit);
        }

        ranked
            .into_iter()
            .map(|(priority, candidate)| RankedMatch {
                item: Arc::clone(&candidate.item),
                priority,
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Cache maintenance
    // ------------------------------------------------------------------

    /// Replace the cached list wholesale
    pub fn replace_candidates(&self, items: Vec<T>) -> bool {
        self.cache.replace(items)
    }

    /// Issue a refresh ticket; pair with [`commit_refresh`](Self::commit_refresh)
    pub fn begin_refresh(&self) -> RefreshTicket {
        self.cache.begin_refresh()
    }

    /// Install a refresh result unless a later-issued refresh already landed
    pub fn commit_refresh(&self, ticket: RefreshTicket, items: Vec<T>) -> bool {
        self.cache.commit(ticket, items)
    }

    /// Load from `source` on the calling thread
    pub fn refresh_from(&self, source: &dyn CandidateSource<T>) -> bool {
        let ticket = self.cache.begin_refresh();
        load_and_commit(&self.cache, ticket, source)
    }

    /// Load from `source` on a background thread.
    ///
    /// The ticket is taken before spawning, so refreshes are ordered by
    /// when they were requested rather than when they finish.
    pub fn refresh_in_background(&self, source: Arc<dyn CandidateSource<T>>) -> JoinHandle<bool> {
        let ticket = self.cache.begin_refresh();
        let cache = Arc::clone(&self.cache);
        std::thread::spawn(move || load_and_commit(&cache, ticket, source.as_ref()))
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.is_loaded()
    }

    pub fn candidate_count(&self) -> usize {
        self.cache.len()
    }

    /// Adjust domain rules (e.g. disabled ids) in place
    pub fn update_filter(&self, update: impl FnOnce(&mut F)) {
        update(&mut self.filter.write());
    }
}

#[instrument(name = "candidate_refresh", skip(cache, source), fields(domain = %T::DOMAIN, ticket = ticket.generation()))]
fn load_and_commit<T: Searchable>(
    cache: &CandidateCache<T>,
    ticket: RefreshTicket,
    source: &dyn CandidateSource<T>,
) -> bool {
    match source.load_candidates() {
        Ok(items) => cache.commit(ticket, items),
        Err(e) => {
            let err = SearchKitError::CandidateLoad {
                domain: T::DOMAIN,
                message: format!("{:#}", e),
            };
            warn!(error = %err, "Keeping previous candidate list");
            false
        }
    }
}

fn collect_alphabetical<T>(
    candidates: &[IndexedCandidate<T>],
    include: impl Fn(&IdentityKey) -> bool,
) -> Vec<Arc<T>> {
    let mut selected: Vec<&IndexedCandidate<T>> =
        candidates.iter().filter(|c| include(&c.key)).collect();
    selected.sort_by(|a, b| match a.sort_name.cmp(&b.sort_name) {
        Ordering::Equal => a.key.cmp(&b.key),
        other => other,
    });
    selected.into_iter().map(|c| Arc::clone(&c.item)).collect()
}

fn collect_pinned<T>(
    candidates: &[IndexedCandidate<T>],
    customizations: &DomainCustomizations,
) -> Vec<Arc<T>> {
    collect_alphabetical(candidates, |key| {
        customizations.pinned.contains(key) && !customizations.excluded.contains(key)
    })
}
