//! In-memory candidate cache with supersede-able refreshes
//!
//! A refresh takes a ticket when it is *issued*; its result is installed only
//! if no later-issued refresh has already committed. Readers get an `Arc`
//! snapshot and never block a writer for longer than a pointer swap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::types::{IdentityKey, Searchable};
use crate::search::normalize;

/// A candidate plus the per-load precomputed matching data
#[derive(Debug)]
pub struct IndexedCandidate<T> {
    pub item: Arc<T>,
    pub key: IdentityKey,
    /// Lowercased display name used for alphabetical ordering
    pub sort_name: String,
    /// Normalized match fields, primary name first
    pub fields: Vec<String>,
}

impl<T: Searchable> IndexedCandidate<T> {
    fn new(item: T) -> Self {
        let key = item.identity();
        let sort_name = item.display_name().to_lowercase();
        let fields = item.match_fields().into_iter().map(normalize).collect();
        IndexedCandidate {
            item: Arc::new(item),
            key,
            sort_name,
            fields,
        }
    }
}

/// Proof that a refresh was issued; ordering is by issue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

struct CacheState<T> {
    items: Arc<Vec<IndexedCandidate<T>>>,
    committed: u64,
    loaded: bool,
}

pub struct CandidateCache<T> {
    state: RwLock<CacheState<T>>,
    issued: AtomicU64,
}

impl<T: Searchable> CandidateCache<T> {
    pub fn new() -> Self {
        CandidateCache {
            state: RwLock::new(CacheState {
                items: Arc::new(Vec::new()),
                committed: 0,
                loaded: false,
            }),
            issued: AtomicU64::new(0),
        }
    }

    /// Issue a ticket for a refresh that is about to start
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install `items` unless a later-issued refresh already committed.
    ///
    /// Returns true when the list was installed.
    pub fn commit(&self, ticket: RefreshTicket, items: Vec<T>) -> bool {
        // Index outside the lock; only the swap is serialized
        let indexed: Vec<IndexedCandidate<T>> =
            items.into_iter().map(IndexedCandidate::new).collect();

        let mut state = self.state.write();
        if ticket.0 <= state.committed {
            debug!(
                domain = %T::DOMAIN,
                ticket = ticket.0,
                committed = state.committed,
                "Discarding stale candidate refresh"
            );
            return false;
        }
        let count = indexed.len();
        state.items = Arc::new(indexed);
        state.committed = ticket.0;
        state.loaded = true;
        info!(
            domain = %T::DOMAIN,
            ticket = ticket.0,
            candidate_count = count,
            "Candidate cache updated"
        );
        true
    }

    /// Replace the whole list immediately (begin + commit)
    pub fn replace(&self, items: Vec<T>) -> bool {
        let ticket = self.begin_refresh();
        self.commit(ticket, items)
    }

    /// Current candidates; empty until the first commit
    pub fn snapshot(&self) -> Arc<Vec<IndexedCandidate<T>>> {
        Arc::clone(&self.state.read().items)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generation of the refresh whose data is installed (0 = never loaded)
    pub fn committed_generation(&self) -> u64 {
        self.state.read().committed
    }
}

impl<T: Searchable> Default for CandidateCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
