//! Installed applications

use serde::{Deserialize, Serialize};

use super::handler::{DomainFilter, SearchHandler};
use super::types::{Domain, IdentityKey, Searchable};

/// An installed, launchable application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub package_name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl AppEntry {
    pub fn new(package_name: impl Into<String>, label: impl Into<String>) -> Self {
        AppEntry {
            package_name: package_name.into(),
            label: label.into(),
            description: None,
            keywords: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Searchable for AppEntry {
    const DOMAIN: Domain = Domain::Apps;

    fn identity(&self) -> IdentityKey {
        IdentityKey::new(self.package_name.as_str())
    }

    fn display_name(&self) -> &str {
        &self.label
    }

    fn match_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.label.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.keywords.iter().map(String::as_str));
        fields
    }
}

/// Apps have no disqualifiers; multi-word queries match word by word
#[derive(Debug, Clone, Copy, Default)]
pub struct AppFilter;

impl DomainFilter<AppEntry> for AppFilter {
    fn token_aware(&self) -> bool {
        true
    }
}

pub type AppSearchHandler = SearchHandler<AppEntry, AppFilter>;
