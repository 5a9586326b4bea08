//! Customization overlay - pins, exclusions and nicknames per domain
//!
//! # Module Structure
//!
//! - `state` - `DomainCustomizations`, `Preferences` and `PreferenceChange`
//! - `store` - the `PreferenceStore` seam with JSON and in-memory stores
//! - `overlay` - `CustomizationOverlay`, the only writer of customization state

mod overlay;
mod state;
mod store;

pub use overlay::{CustomizationOverlay, MutationOutcome, RejectReason};
pub use state::{CustomizationState, DomainCustomizations, PreferenceChange, Preferences};
pub use store::{
    default_preferences_path, JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore,
};

#[cfg(test)]
#[path = "customization_tests.rs"]
mod tests;
