//! The customization overlay
//!
//! All mutations, for every domain and key, serialize through one lock, and
//! the persisted change is recorded while that lock is held. Readers take a
//! per-domain snapshot once per search.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use super::state::{CustomizationState, DomainCustomizations, PreferenceChange};
use super::store::PreferenceStore;
use crate::debug_panic;
use crate::domains::{Domain, IdentityKey};
use crate::error::Result;

/// Why a mutation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Pinning is not allowed while the key is excluded
    ExcludedKey,
    /// Identity keys must be non-empty
    EmptyKey,
}

/// Result of a successful overlay call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// State already matched the request; nothing persisted
    Unchanged,
    Rejected(RejectReason),
}

pub struct CustomizationOverlay {
    state: Mutex<CustomizationState>,
    store: Arc<dyn PreferenceStore>,
}

impl CustomizationOverlay {
    pub fn new(state: CustomizationState, store: Arc<dyn PreferenceStore>) -> Self {
        CustomizationOverlay {
            state: Mutex::new(state),
            store,
        }
    }

    /// Empty overlay writing through `store`
    pub fn empty(store: Arc<dyn PreferenceStore>) -> Self {
        Self::new(CustomizationState::default(), store)
    }

    /// Copy of one domain's customizations, for the duration of one search
    pub fn snapshot(&self, domain: Domain) -> DomainCustomizations {
        self.state.lock().domain(domain).cloned().unwrap_or_default()
    }

    /// Copy of every domain's customizations
    pub fn state(&self) -> CustomizationState {
        self.state.lock().clone()
    }

    pub fn nickname(&self, domain: Domain, key: &IdentityKey) -> Option<String> {
        self.state
            .lock()
            .domain(domain)
            .and_then(|c| c.nickname(key))
            .map(str::to_string)
    }

    pub fn pin(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.mutate(domain, key, "pin", |c| {
            if c.excluded.contains(key) {
                return Err(RejectReason::ExcludedKey);
            }
            Ok(if c.pinned.insert(key.clone()) {
                vec![PreferenceChange::Pinned {
                    domain,
                    key: key.clone(),
                }]
            } else {
                vec![]
            })
        })
    }

    pub fn unpin(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.mutate(domain, key, "unpin", |c| {
            Ok(if c.pinned.remove(key) {
                vec![PreferenceChange::Unpinned {
                    domain,
                    key: key.clone(),
                }]
            } else {
                vec![]
            })
        })
    }

    /// Exclude a key; an existing pin is dropped after the exclusion lands
    pub fn exclude(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.mutate(domain, key, "exclude", |c| {
            let mut changes = Vec::new();
            if c.excluded.insert(key.clone()) {
                changes.push(PreferenceChange::Excluded {
                    domain,
                    key: key.clone(),
                });
            }
            if c.pinned.remove(key) {
                changes.push(PreferenceChange::Unpinned {
                    domain,
                    key: key.clone(),
                });
            }
            Ok(changes)
        })
    }

    pub fn include(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.mutate(domain, key, "include", |c| {
            Ok(if c.excluded.remove(key) {
                vec![PreferenceChange::Included {
                    domain,
                    key: key.clone(),
                }]
            } else {
                vec![]
            })
        })
    }

    /// Set or clear (None / blank) a nickname
    pub fn set_nickname(
        &self,
        domain: Domain,
        key: &IdentityKey,
        nickname: Option<&str>,
    ) -> Result<MutationOutcome> {
        let nickname = nickname
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        self.mutate(domain, key, "set_nickname", |c| {
            let current = c.nicknames.get(key);
            if current == nickname.as_ref() {
                return Ok(vec![]);
            }
            match &nickname {
                Some(n) => {
                    c.nicknames.insert(key.clone(), n.clone());
                }
                None => {
                    c.nicknames.remove(key);
                }
            }
            Ok(vec![PreferenceChange::Nickname {
                domain,
                key: key.clone(),
                nickname: nickname.clone(),
            }])
        })
    }

    /// Restore every excluded key of a domain
    pub fn clear_all_excluded(&self, domain: Domain) -> Result<MutationOutcome> {
        let mut state = self.state.lock();
        let customizations = state.domain_mut(domain);
        if customizations.excluded.is_empty() {
            return Ok(MutationOutcome::Unchanged);
        }
        let cleared = customizations.excluded.len();
        customizations.excluded.clear();
        info!(domain = %domain, cleared, "Cleared excluded items");
        self.store
            .record(&PreferenceChange::ExcludedCleared { domain })?;
        Ok(MutationOutcome::Applied)
    }

    /// Apply `op` under the lock, then record its changes in order.
    ///
    /// The in-memory state keeps the change even if recording fails.
    fn mutate<F>(
        &self,
        domain: Domain,
        key: &IdentityKey,
        operation: &'static str,
        op: F,
    ) -> Result<MutationOutcome>
    where
        F: FnOnce(&mut DomainCustomizations) -> std::result::Result<Vec<PreferenceChange>, RejectReason>,
    {
        if key.as_str().trim().is_empty() {
            return Ok(MutationOutcome::Rejected(RejectReason::EmptyKey));
        }

        let mut state = self.state.lock();
        let customizations = state.domain_mut(domain);
        let changes = match op(customizations) {
            Ok(changes) => changes,
            Err(reason) => {
                warn!(domain = %domain, key = %key, operation, ?reason, "Customization rejected");
                return Ok(MutationOutcome::Rejected(reason));
            }
        };

        let conflicts = customizations.conflicts();
        if !conflicts.is_empty() {
            debug_panic!(
                "{} left {} key(s) both pinned and excluded in {}",
                operation,
                conflicts.len(),
                domain
            );
        }

        if changes.is_empty() {
            return Ok(MutationOutcome::Unchanged);
        }
        info!(domain = %domain, key = %key, operation, change_count = changes.len(), "Customization applied");

        for change in &changes {
            self.store.record(change)?;
        }
        Ok(MutationOutcome::Applied)
    }
}
