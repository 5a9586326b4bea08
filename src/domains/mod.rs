//! Per-domain search handlers
//!
//! # Module Structure
//!
//! - `types` - `Domain`, `IdentityKey`, the `Searchable` trait and `SearchableEntity`
//! - `cache` - candidate snapshots with issue-ordered refresh commits
//! - `handler` - the generic `SearchHandler` ranking pipeline
//! - `apps`, `contacts`, `files`, `settings`, `shortcuts` - entities and domain rules

mod apps;
mod cache;
mod contacts;
mod files;
mod handler;
mod settings;
mod shortcuts;
mod types;

pub use apps::{AppEntry, AppFilter, AppSearchHandler};
pub use cache::{CandidateCache, IndexedCandidate, RefreshTicket};
pub use contacts::{ContactEntry, ContactFilter, ContactSearchHandler, PhoneNumber};
pub use files::{FileEntry, FileFilter, FileSearchHandler};
pub use handler::{CandidateSource, DomainFilter, DomainState, RankedMatch, SearchHandler};
pub use settings::{DeviceSettingEntry, SettingFilter, SettingSearchHandler};
pub use shortcuts::{AppShortcutEntry, ShortcutFilter, ShortcutSearchHandler};
pub use types::{Domain, IdentityKey, IntoEntity, Searchable, SearchableEntity};

#[cfg(test)]
#[path = "domains_tests.rs"]
mod tests;
