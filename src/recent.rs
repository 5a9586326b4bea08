//! Recent-activity ledger
//!
//! Newest-first list of what the user searched for or opened, persisted as
//! a JSON array of raw strings. Each string is a tagged [`RecentEntry`];
//! strings that do not parse (older plain-text records, hand edits) are
//! kept as plain query entries rather than dropping the whole list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::RecentConfig;
use crate::domains::SearchableEntity;
use crate::search::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecentEntry {
    Query {
        text: String,
    },
    Contact {
        id: i64,
        name: String,
    },
    File {
        uri: String,
        name: String,
    },
    Setting {
        id: String,
        title: String,
    },
    #[serde(rename_all = "camelCase")]
    AppShortcut {
        package_name: String,
        shortcut_id: String,
        label: String,
    },
}

impl RecentEntry {
    pub fn query(text: impl Into<String>) -> Self {
        RecentEntry::Query { text: text.into() }
    }

    /// De-duplication key; labels do not take part
    pub fn stable_key(&self) -> String {
        match self {
            RecentEntry::Query { text } => format!("query:{}", normalize(text)),
            RecentEntry::Contact { id, .. } => format!("contact:{}", id),
            RecentEntry::File { uri, .. } => format!("file:{}", uri),
            RecentEntry::Setting { id, .. } => format!("setting:{}", id),
            RecentEntry::AppShortcut {
                package_name,
                shortcut_id,
                ..
            } => format!("shortcut:{}/{}", package_name, shortcut_id),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RecentEntry::Query { text } => text,
            RecentEntry::Contact { name, .. } | RecentEntry::File { name, .. } => name,
            RecentEntry::Setting { title, .. } => title,
            RecentEntry::AppShortcut { label, .. } => label,
        }
    }

    /// Ledger entry for an opened search result; apps are not tracked
    pub fn from_entity(entity: &SearchableEntity) -> Option<Self> {
        let entry = match entity {
            SearchableEntity::App(_) => return None,
            SearchableEntity::Contact(c) => RecentEntry::Contact {
                id: c.id,
                name: c.display_name.clone(),
            },
            SearchableEntity::File(f) => RecentEntry::File {
                uri: f.uri.clone(),
                name: f.name.clone(),
            },
            SearchableEntity::Setting(s) => RecentEntry::Setting {
                id: s.id.clone(),
                title: s.title.clone(),
            },
            SearchableEntity::Shortcut(s) => RecentEntry::AppShortcut {
                package_name: s.package_name.clone(),
                shortcut_id: s.shortcut_id.clone(),
                label: s.short_label.clone(),
            },
        };
        Some(entry)
    }

    /// Parse one persisted string, recovering unparsable text as a query
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, raw_len = raw.len(), "Malformed recent entry, keeping as query");
                RecentEntry::query(raw.trim())
            }
        }
    }

    fn to_raw(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize recent entry")
    }

    fn is_blank_query(&self) -> bool {
        matches!(self, RecentEntry::Query { text } if text.trim().is_empty())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecentData {
    #[serde(default)]
    entries: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RecentLedger {
    /// Newest first
    entries: Vec<RecentEntry>,
    file_path: PathBuf,
    capacity: usize,
    enabled: bool,
    dirty: bool,
}

impl RecentLedger {
    /// Ledger at the default path (~/.searchkit/recent.json)
    pub fn new(config: &RecentConfig) -> Self {
        Self::with_path(Self::default_path(), config)
    }

    pub fn with_path(path: PathBuf, config: &RecentConfig) -> Self {
        RecentLedger {
            entries: Vec::new(),
            file_path: path,
            capacity: config.capacity,
            enabled: config.enabled,
            dirty: false,
        }
    }

    fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.searchkit/recent.json").as_ref())
    }

    /// Record activity; returns whether the ledger changed
    pub fn record(&mut self, entry: RecentEntry) -> bool {
        if !self.enabled || self.capacity == 0 {
            debug!("Recent activity disabled, not recording");
            return false;
        }
        if entry.is_blank_query() {
            return false;
        }
        let entry = match entry {
            RecentEntry::Query { text } => RecentEntry::query(text.trim()),
            other => other,
        };

        let key = entry.stable_key();
        self.entries.retain(|existing| existing.stable_key() != key);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        self.dirty = true;
        true
    }

    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    /// Remove the entry with the same stable key
    pub fn delete(&mut self, entry: &RecentEntry) -> bool {
        let key = entry.stable_key();
        let before = self.entries.len();
        self.entries.retain(|existing| existing.stable_key() != key);
        let removed = self.entries.len() != before;
        self.dirty |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Load from disk; a missing file is an empty ledger
    #[instrument(name = "recent_load", skip(self))]
    pub fn load(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "Recent file not found, starting fresh");
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.file_path).with_context(|| {
            format!("Failed to read recent file: {}", self.file_path.display())
        })?;
        let data: RecentData =
            serde_json::from_str(&content).context("Failed to parse recent JSON")?;

        let mut seen = std::collections::HashSet::new();
        self.entries = data
            .entries
            .iter()
            .map(|raw| RecentEntry::from_raw(raw))
            .filter(|entry| !entry.is_blank_query())
            .filter(|entry| seen.insert(entry.stable_key()))
            .take(self.capacity)
            .collect();

        info!(
            path = %self.file_path.display(),
            entry_count = self.entries.len(),
            "Loaded recent activity"
        );
        self.dirty = false;
        Ok(())
    }

    /// Save to disk using atomic write (write temp + rename)
    #[instrument(name = "recent_save", skip(self))]
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            debug!("No changes to save");
            return Ok(());
        }

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let data = RecentData {
            entries: self
                .entries
                .iter()
                .map(RecentEntry::to_raw)
                .collect::<Result<_>>()?,
        };
        let json = serde_json::to_string(&data).context("Failed to serialize recent data")?;

        let temp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&temp_path, &json).with_context(|| {
            format!("Failed to write temp recent file: {}", temp_path.display())
        })?;
        std::fs::rename(&temp_path, &self.file_path).with_context(|| {
            format!("Failed to rename temp file to {}", self.file_path.display())
        })?;

        info!(
            path = %self.file_path.display(),
            entry_count = self.entries.len(),
            bytes = json.len(),
            "Saved recent activity (atomic)"
        );
        self.dirty = false;
        Ok(())
    }
}
