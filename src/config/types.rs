//! Configuration type definitions
//!
//! This module contains all the struct definitions for configuration.

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::domains::Domain;

// ============================================
// SEARCH CONFIG
// ============================================

/// Query gating and per-domain result caps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Minimum trimmed query length before any domain returns results (default: 2)
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
    #[serde(default = "default_apps_limit")]
    pub apps_limit: Option<usize>,
    #[serde(default = "default_contacts_limit")]
    pub contacts_limit: Option<usize>,
    #[serde(default = "default_files_limit")]
    pub files_limit: Option<usize>,
    #[serde(default = "default_settings_limit")]
    pub settings_limit: Option<usize>,
    #[serde(default = "default_shortcuts_limit")]
    pub shortcuts_limit: Option<usize>,
}

fn default_min_query_length() -> usize {
    DEFAULT_MIN_QUERY_LENGTH
}
fn default_apps_limit() -> Option<usize> {
    DEFAULT_APPS_LIMIT
}
fn default_contacts_limit() -> Option<usize> {
    DEFAULT_CONTACTS_LIMIT
}
fn default_files_limit() -> Option<usize> {
    DEFAULT_FILES_LIMIT
}
fn default_settings_limit() -> Option<usize> {
    DEFAULT_SETTINGS_LIMIT
}
fn default_shortcuts_limit() -> Option<usize> {
    DEFAULT_SHORTCUTS_LIMIT
}

impl SearchConfig {
    /// Result cap for a domain
    pub fn limit_for(&self, domain: Domain) -> Option<usize> {
        match domain {
            Domain::Apps => self.apps_limit,
            Domain::Contacts => self.contacts_limit,
            Domain::Files => self.files_limit,
            Domain::Settings => self.settings_limit,
            Domain::Shortcuts => self.shortcuts_limit,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            apps_limit: DEFAULT_APPS_LIMIT,
            contacts_limit: DEFAULT_CONTACTS_LIMIT,
            files_limit: DEFAULT_FILES_LIMIT,
            settings_limit: DEFAULT_SETTINGS_LIMIT,
            shortcuts_limit: DEFAULT_SHORTCUTS_LIMIT,
        }
    }
}

// ============================================
// FILE SEARCH CONFIG
// ============================================

/// File-domain disqualification rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSearchConfig {
    /// Extensions (without dot, case-insensitive) that never show up in results
    #[serde(default = "default_excluded_extensions")]
    pub excluded_extensions: Vec<String>,
    /// Show dot-files (default: false)
    #[serde(default = "default_show_hidden_files")]
    pub show_hidden_files: bool,
    /// `*/segment/*` patterns; when non-empty a file must match one of them
    #[serde(default)]
    pub folder_whitelist: Vec<String>,
    /// `*/segment/*` patterns; a match always removes the file
    #[serde(default)]
    pub folder_blacklist: Vec<String>,
}

fn default_excluded_extensions() -> Vec<String> {
    DEFAULT_EXCLUDED_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_show_hidden_files() -> bool {
    DEFAULT_SHOW_HIDDEN_FILES
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        FileSearchConfig {
            excluded_extensions: default_excluded_extensions(),
            show_hidden_files: DEFAULT_SHOW_HIDDEN_FILES,
            folder_whitelist: Vec::new(),
            folder_blacklist: Vec::new(),
        }
    }
}

// ============================================
// DISABLED IDS (settings, shortcuts)
// ============================================

/// Ids the user has switched off for a domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledIdsConfig {
    #[serde(default)]
    pub disabled_ids: Vec<String>,
}

// ============================================
// RECENT CONFIG
// ============================================

/// Configuration for the recent-activity ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentConfig {
    /// Whether new activity is recorded (default: true)
    /// If false, existing entries are still readable
    #[serde(default = "default_recent_enabled")]
    pub enabled: bool,
    /// Maximum number of entries kept, newest first (default: 10)
    #[serde(default = "default_recent_capacity")]
    pub capacity: usize,
}

fn default_recent_enabled() -> bool {
    DEFAULT_RECENT_ENABLED
}
fn default_recent_capacity() -> usize {
    DEFAULT_RECENT_CAPACITY
}

impl Default for RecentConfig {
    fn default() -> Self {
        RecentConfig {
            enabled: DEFAULT_RECENT_ENABLED,
            capacity: DEFAULT_RECENT_CAPACITY,
        }
    }
}

// ============================================
// LOGGING CONFIG
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the JSONL log file (default: ~/.searchkit/logs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            directory: None,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub files: FileSearchConfig,
    #[serde(default)]
    pub settings: DisabledIdsConfig,
    #[serde(default)]
    pub shortcuts: DisabledIdsConfig,
    #[serde(default)]
    pub recent: RecentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
