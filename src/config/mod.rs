//! Configuration module - search tuning and user preferences
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.searchkit/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, SearchConfig, etc.)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_MIN_QUERY_LENGTH, DEFAULT_RECENT_CAPACITY};

pub use types::{
    Config, DisabledIdsConfig, FileSearchConfig, LoggingConfig, RecentConfig, SearchConfig,
};

pub use loader::{default_config_path, load_config, load_config_from, read_config};

#[cfg(test)]
pub use defaults::{
    DEFAULT_EXCLUDED_EXTENSIONS, DEFAULT_FILES_LIMIT, DEFAULT_SETTINGS_LIMIT,
    DEFAULT_SHORTCUTS_LIMIT,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
