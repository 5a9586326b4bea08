//! Search Kit Core - device-local search across apps, contacts, files,
//! settings and app shortcuts
//!
//! Ranks candidates against a typed query, layers user customizations
//! (pin, exclude, nickname) over the source data, and resolves the channel
//! that handles "call" or "message" for a contact.

pub mod actions;
pub mod config;
pub mod customization;
pub mod domains;
pub mod engine;
pub mod error;
pub mod folder_pattern;
pub mod logging;
pub mod phone;
pub mod recent;
pub mod search;

pub use engine::{CallLaunch, DomainResults, Platform, SearchKit};
pub use error::{Result, SearchKitError};
