//! Files from shared storage
//!
//! Besides user configuration, a handful of fixed rules keep noise out of
//! file results: app-private storage, installer packages and directories
//! named after package ids never show up.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::handler::{DomainFilter, SearchHandler};
use super::types::{Domain, IdentityKey, Searchable};
use crate::config::FileSearchConfig;
use crate::folder_pattern::{self, FolderFilter};

/// Path prefixes (normalized) holding app-private data
const SYSTEM_PATH_PREFIXES: &[&str] = &["android/data", "android/obb"];

const APK_EXTENSION: &str = "apk";

/// `com.example.app` style names, at least three dot-separated parts
fn reverse_dns_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z0-9_]+){2,}$").expect("Invalid regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Content URI; the identity of the file
    pub uri: String,
    pub name: String,
    /// Path relative to the storage root, including the file name
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub is_directory: bool,
}

impl FileEntry {
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Self {
        FileEntry {
            uri: uri.into(),
            name: name.into(),
            relative_path: relative_path.into(),
            mime_type: None,
            size_bytes: None,
            is_directory: false,
        }
    }

    /// Lowercase extension without the dot; None for dot-files and
    /// extensionless names
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Name without its extension
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
            _ => &self.name,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
            || folder_pattern::normalize(&self.relative_path)
                .split('/')
                .any(|part| part.starts_with('.'))
    }

    fn is_system_path(&self) -> bool {
        let path = folder_pattern::normalize(&self.relative_path);
        SYSTEM_PATH_PREFIXES
            .iter()
            .any(|prefix| path == *prefix || path.starts_with(&format!("{}/", prefix)))
    }

    fn is_package_directory(&self) -> bool {
        self.is_directory && reverse_dns_pattern().is_match(&self.name.to_lowercase())
    }
}

impl Searchable for FileEntry {
    const DOMAIN: Domain = Domain::Files;

    fn identity(&self) -> IdentityKey {
        IdentityKey::new(self.uri.as_str())
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn match_fields(&self) -> Vec<&str> {
        let stem = self.stem();
        if stem == self.name {
            vec![self.name.as_str()]
        } else {
            vec![self.name.as_str(), stem]
        }
    }
}

/// File disqualification rules built from [`FileSearchConfig`]
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    excluded_extensions: HashSet<String>,
    show_hidden: bool,
    folders: FolderFilter,
}

impl FileFilter {
    pub fn from_config(config: &FileSearchConfig) -> Self {
        FileFilter {
            excluded_extensions: config
                .excluded_extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            show_hidden: config.show_hidden_files,
            folders: FolderFilter::new(&config.folder_whitelist, &config.folder_blacklist),
        }
    }

    pub fn set_show_hidden(&mut self, show_hidden: bool) {
        self.show_hidden = show_hidden;
    }

    pub fn set_folder_filter(&mut self, folders: FolderFilter) {
        self.folders = folders;
    }
}

impl DomainFilter<FileEntry> for FileFilter {
    fn is_disqualified(&self, file: &FileEntry) -> bool {
        if !self.show_hidden && file.is_hidden() {
            return true;
        }
        if file.is_system_path() || file.is_package_directory() {
            return true;
        }
        if let Some(ext) = file.extension() {
            if ext == APK_EXTENSION || self.excluded_extensions.contains(&ext) {
                return true;
            }
        }
        !self.folders.allows(&file.relative_path)
    }

    fn token_aware(&self) -> bool {
        true
    }
}

pub type FileSearchHandler = SearchHandler<FileEntry, FileFilter>;

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, path: &str) -> FileEntry {
        FileEntry::new(format!("content://media/{}", path), name, path)
    }

    #[test]
    fn test_extension_and_stem() {
        let f = file("Invoice.PDF", "Download/Invoice.PDF");
        assert_eq!(f.extension().as_deref(), Some("pdf"));
        assert_eq!(f.stem(), "Invoice");
        let dot = file(".nomedia", "DCIM/.nomedia");
        assert_eq!(dot.extension(), None);
        assert_eq!(dot.stem(), ".nomedia");
    }

    #[test]
    fn test_default_rules() {
        let filter = FileFilter::from_config(&FileSearchConfig::default());
        assert!(!filter.is_disqualified(&file("invoice.pdf", "Download/invoice.pdf")));
        assert!(filter.is_disqualified(&file(".secret.txt", "Documents/.secret.txt")));
        assert!(filter.is_disqualified(&file("a.txt", "Documents/.cache/a.txt")));
        assert!(!filter.is_disqualified(&file("crash.log", "Documents/crash.log")));
        assert!(filter.is_disqualified(&file("game.apk", "Download/game.apk")));
        assert!(filter.is_disqualified(&file("save.dat", "Android/data/com.game/save.dat")));
        assert!(filter.is_disqualified(&file("main.obb", "android/OBB/main.obb")));
    }

    #[test]
    fn test_configured_extensions_are_excluded() {
        let config = FileSearchConfig {
            excluded_extensions: vec!["LOG".to_string(), "tmp".to_string()],
            ..FileSearchConfig::default()
        };
        let filter = FileFilter::from_config(&config);
        assert!(filter.is_disqualified(&file("crash.log", "Documents/crash.log")));
        assert!(filter.is_disqualified(&file("Draft.TMP", "Documents/Draft.TMP")));
        assert!(!filter.is_disqualified(&file("notes.txt", "Documents/notes.txt")));
    }

    #[test]
    fn test_package_named_directories() {
        let filter = FileFilter::default();
        let mut dir = file("com.whatsapp.media", "com.whatsapp.media");
        dir.is_directory = true;
        assert!(filter.is_disqualified(&dir));

        // A file with dots in its name is not a package directory
        let doc = file("report.final.v2", "Documents/report.final.v2");
        assert!(!filter.is_disqualified(&doc));
    }

    #[test]
    fn test_show_hidden() {
        let mut filter = FileFilter::default();
        filter.set_show_hidden(true);
        assert!(!filter.is_disqualified(&file(".profile", "Documents/.profile")));
    }

    #[test]
    fn test_folder_lists_apply() {
        let config = FileSearchConfig {
            folder_whitelist: vec!["*/Documents/*".to_string()],
            folder_blacklist: vec!["*/Private/*".to_string()],
            ..FileSearchConfig::default()
        };
        let filter = FileFilter::from_config(&config);
        assert!(!filter.is_disqualified(&file("cv.pdf", "Documents/cv.pdf")));
        assert!(filter.is_disqualified(&file("song.mp3", "Music/song.mp3")));
        assert!(filter.is_disqualified(&file("tax.pdf", "Documents/Private/tax.pdf")));
    }
}
