//! Search module - text match classification shared by every domain
//!
//! # Module Structure
//!
//! - `priority` - `MatchPriority` tiers, query normalization and the gate

mod priority;

pub use priority::{normalize, priority, priority_with_tokens, MatchPriority, SearchQuery};

pub(crate) use priority::{best_field_priority, nickname_matches};
