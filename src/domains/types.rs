//! Core data types shared by every search domain

use std::fmt;

use serde::{Deserialize, Serialize};

use super::apps::AppEntry;
use super::contacts::ContactEntry;
use super::files::FileEntry;
use super::settings::DeviceSettingEntry;
use super::shortcuts::AppShortcutEntry;

/// Source of searchable candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Apps,
    Contacts,
    Files,
    Settings,
    Shortcuts,
}

impl Domain {
    /// Every domain, in the order unified results are presented
    pub const ALL: [Domain; 5] = [
        Domain::Apps,
        Domain::Shortcuts,
        Domain::Contacts,
        Domain::Settings,
        Domain::Files,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Apps => "apps",
            Domain::Contacts => "contacts",
            Domain::Files => "files",
            Domain::Settings => "settings",
            Domain::Shortcuts => "shortcuts",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apps" | "app" => Ok(Domain::Apps),
            "contacts" | "contact" => Ok(Domain::Contacts),
            "files" | "file" => Ok(Domain::Files),
            "settings" | "setting" => Ok(Domain::Settings),
            "shortcuts" | "shortcut" => Ok(Domain::Shortcuts),
            other => Err(format!("unknown domain '{}'", other)),
        }
    }
}

/// Stable, domain-scoped identity of a candidate across loads.
///
/// - apps: package name
/// - contacts: numeric contact id
/// - files: content URI
/// - settings: setting id
/// - shortcuts: `package/shortcut_id`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        IdentityKey(key.into())
    }

    pub fn contact(id: i64) -> Self {
        IdentityKey(id.to_string())
    }

    pub fn shortcut(package_name: &str, shortcut_id: &str) -> Self {
        IdentityKey(format!("{}/{}", package_name, shortcut_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdentityKey {
    fn from(value: &str) -> Self {
        IdentityKey(value.to_string())
    }
}

/// A candidate that can be ranked against a query.
pub trait Searchable: Send + Sync + 'static {
    const DOMAIN: Domain;

    fn identity(&self) -> IdentityKey;

    /// Title shown to the user; drives alphabetical ordering
    fn display_name(&self) -> &str;

    /// Text fields used for matching, primary name first
    fn match_fields(&self) -> Vec<&str>;
}

/// Any candidate from any domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum SearchableEntity {
    App(AppEntry),
    Contact(ContactEntry),
    File(FileEntry),
    Setting(DeviceSettingEntry),
    Shortcut(AppShortcutEntry),
}

impl SearchableEntity {
    pub fn domain(&self) -> Domain {
        match self {
            SearchableEntity::App(_) => Domain::Apps,
            SearchableEntity::Contact(_) => Domain::Contacts,
            SearchableEntity::File(_) => Domain::Files,
            SearchableEntity::Setting(_) => Domain::Settings,
            SearchableEntity::Shortcut(_) => Domain::Shortcuts,
        }
    }

    pub fn identity(&self) -> IdentityKey {
        match self {
            SearchableEntity::App(e) => e.identity(),
            SearchableEntity::Contact(e) => e.identity(),
            SearchableEntity::File(e) => e.identity(),
            SearchableEntity::Setting(e) => e.identity(),
            SearchableEntity::Shortcut(e) => e.identity(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SearchableEntity::App(e) => e.display_name(),
            SearchableEntity::Contact(e) => e.display_name(),
            SearchableEntity::File(e) => e.display_name(),
            SearchableEntity::Setting(e) => e.display_name(),
            SearchableEntity::Shortcut(e) => e.display_name(),
        }
    }
}

/// Conversion from a domain entity into the unified enum
pub trait IntoEntity {
    fn into_entity(self) -> SearchableEntity;
}

impl IntoEntity for AppEntry {
    fn into_entity(self) -> SearchableEntity {
        SearchableEntity::App(self)
    }
}

impl IntoEntity for ContactEntry {
    fn into_entity(self) -> SearchableEntity {
        SearchableEntity::Contact(self)
    }
}

impl IntoEntity for FileEntry {
    fn into_entity(self) -> SearchableEntity {
        SearchableEntity::File(self)
    }
}

impl IntoEntity for DeviceSettingEntry {
    fn into_entity(self) -> SearchableEntity {
        SearchableEntity::Setting(self)
    }
}

impl IntoEntity for AppShortcutEntry {
    fn into_entity(self) -> SearchableEntity {
        SearchableEntity::Shortcut(self)
    }
}
