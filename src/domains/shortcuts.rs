//! App shortcuts published by installed applications

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::handler::{DomainFilter, SearchHandler};
use super::types::{Domain, IdentityKey, Searchable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppShortcutEntry {
    pub package_name: String,
    pub shortcut_id: String,
    pub short_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_label: Option<String>,
    /// Label of the owning app
    pub app_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AppShortcutEntry {
    pub fn new(
        package_name: impl Into<String>,
        shortcut_id: impl Into<String>,
        short_label: impl Into<String>,
        app_label: impl Into<String>,
    ) -> Self {
        AppShortcutEntry {
            package_name: package_name.into(),
            shortcut_id: shortcut_id.into(),
            short_label: short_label.into(),
            long_label: None,
            app_label: app_label.into(),
            icon: None,
        }
    }
}

impl Searchable for AppShortcutEntry {
    const DOMAIN: Domain = Domain::Shortcuts;

    fn identity(&self) -> IdentityKey {
        IdentityKey::shortcut(&self.package_name, &self.shortcut_id)
    }

    fn display_name(&self) -> &str {
        &self.short_label
    }

    fn match_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.short_label.as_str()];
        fields.extend(self.long_label.as_deref());
        fields.push(self.app_label.as_str());
        fields
    }
}

/// Hides shortcuts the user switched off, by composite `package/id` key
#[derive(Debug, Clone, Default)]
pub struct ShortcutFilter {
    disabled_ids: HashSet<String>,
}

impl ShortcutFilter {
    pub fn new<I, S>(disabled_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ShortcutFilter {
            disabled_ids: disabled_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn set_disabled_ids<I, S>(&mut self, disabled_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled_ids = disabled_ids.into_iter().map(Into::into).collect();
    }
}

impl DomainFilter<AppShortcutEntry> for ShortcutFilter {
    fn is_disqualified(&self, shortcut: &AppShortcutEntry) -> bool {
        self.disabled_ids.contains(shortcut.identity().as_str())
    }
}

pub type ShortcutSearchHandler = SearchHandler<AppShortcutEntry, ShortcutFilter>;
