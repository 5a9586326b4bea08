//! Preference persistence
//!
//! The overlay and channel settings write through a [`PreferenceStore`]
//! one change at a time. The JSON store keeps the whole document in memory
//! and rewrites the file atomically (temp file + rename) after each change.
//! A document that was never read from disk is read before the first write,
//! and a file that cannot be read is never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use super::state::{PreferenceChange, Preferences};
use crate::error::{Result, SearchKitError};

/// Injected persistence for user preferences
pub trait PreferenceStore: Send + Sync {
    /// Read the persisted document; a missing document is the default one
    fn load(&self) -> Result<Preferences>;

    /// Persist one change
    fn record(&self, change: &PreferenceChange) -> Result<()>;
}

/// Default preference file (~/.searchkit/preferences.json)
pub fn default_preferences_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~/.searchkit/preferences.json").as_ref())
}

fn persistence_error(path: &Path, source: std::io::Error) -> SearchKitError {
    SearchKitError::Persistence {
        path: path.display().to_string(),
        source,
    }
}

/// Pretty-printed JSON document on disk
pub struct JsonPreferenceStore {
    path: PathBuf,
    /// None until the file has been read successfully
    document: Mutex<Option<Preferences>>,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonPreferenceStore {
            path: path.into(),
            document: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and repair the file; a missing file is the default document
    fn read(&self) -> Result<Preferences> {
        if !self.path.exists() {
            info!("Preferences file not found, starting fresh");
            return Ok(Preferences::default());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| persistence_error(&self.path, e))?;
        let mut preferences: Preferences = serde_json::from_str(&content)?;
        let repaired = preferences.customizations.repair();
        if repaired > 0 {
            warn!(repaired, "Dropped pins that were also excluded");
        }
        Ok(preferences)
    }

    fn write(&self, document: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| persistence_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(document)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json).map_err(|e| persistence_error(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| persistence_error(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = json.len(), "Saved preferences (atomic)");
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    #[instrument(name = "preferences_load", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Preferences> {
        let preferences = self.read()?;
        *self.document.lock() = Some(preferences.clone());
        info!("Loaded preferences");
        Ok(preferences)
    }

    fn record(&self, change: &PreferenceChange) -> Result<()> {
        // Hold the document lock through the write so files land in change order
        let mut document = self.document.lock();
        if document.is_none() {
            let existing = self.read().map_err(|e| match e {
                SearchKitError::Serialization(e) => persistence_error(
                    &self.path,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                ),
                other => other,
            });
            match existing {
                Ok(existing) => *document = Some(existing),
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "Unreadable preferences file left untouched");
                    return Err(e);
                }
            }
        }
        let document = document.get_or_insert_with(Preferences::default);
        document.apply(change);
        self.write(document)
    }
}

/// In-memory store that keeps every recorded change, in order
#[derive(Default)]
pub struct MemoryPreferenceStore {
    initial: Preferences,
    journal: Mutex<Vec<PreferenceChange>>,
    fail_writes: Mutex<bool>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `load` returns `initial`
    pub fn with_preferences(initial: Preferences) -> Self {
        MemoryPreferenceStore {
            initial,
            ..Self::default()
        }
    }

    /// Every change recorded so far
    pub fn changes(&self) -> Vec<PreferenceChange> {
        self.journal.lock().clone()
    }

    /// Make subsequent `record` calls fail (simulates a full disk)
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Preferences> {
        let mut document = self.initial.clone();
        for change in self.journal.lock().iter() {
            document.apply(change);
        }
        Ok(document)
    }

    fn record(&self, change: &PreferenceChange) -> Result<()> {
        if *self.fail_writes.lock() {
            return Err(SearchKitError::Persistence {
                path: "<memory>".to_string(),
                source: std::io::Error::other("writes disabled"),
            });
        }
        self.journal.lock().push(change.clone());
        Ok(())
    }
}
