//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Queries shorter than this (after trimming) produce no results
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Default result caps per domain (None = uncapped)
pub const DEFAULT_APPS_LIMIT: Option<usize> = None;
pub const DEFAULT_CONTACTS_LIMIT: Option<usize> = None;
pub const DEFAULT_FILES_LIMIT: Option<usize> = Some(6);
pub const DEFAULT_SETTINGS_LIMIT: Option<usize> = Some(6);
pub const DEFAULT_SHORTCUTS_LIMIT: Option<usize> = Some(6);

/// Default file search flags
pub const DEFAULT_SHOW_HIDDEN_FILES: bool = false;

/// User-excluded file extensions; empty until configured (APKs are always dropped)
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[];

/// Default recent-activity settings
pub const DEFAULT_RECENT_ENABLED: bool = true;
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "~/.searchkit/config.json";
