//! Device-setting shortcuts

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::handler::{DomainFilter, SearchHandler};
use super::types::{Domain, IdentityKey, Searchable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSettingEntry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Platform action that opens the settings screen
    pub intent_action: String,
}

impl DeviceSettingEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        intent_action: impl Into<String>,
    ) -> Self {
        DeviceSettingEntry {
            id: id.into(),
            title: title.into(),
            description: None,
            keywords: Vec::new(),
            intent_action: intent_action.into(),
        }
    }
}

impl Searchable for DeviceSettingEntry {
    const DOMAIN: Domain = Domain::Settings;

    fn identity(&self) -> IdentityKey {
        IdentityKey::new(self.id.as_str())
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn match_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.keywords.iter().map(String::as_str));
        fields
    }
}

/// Hides settings the user switched off
#[derive(Debug, Clone, Default)]
pub struct SettingFilter {
    disabled_ids: HashSet<String>,
}

impl SettingFilter {
    pub fn new<I, S>(disabled_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SettingFilter {
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

    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled_ids.contains(id)
    }
}

impl DomainFilter<DeviceSettingEntry> for SettingFilter {
    fn is_disqualified(&self, setting: &DeviceSettingEntry) -> bool {
        self.is_disabled(&setting.id)
    }
}

pub type SettingSearchHandler = SearchHandler<DeviceSettingEntry, SettingFilter>;
