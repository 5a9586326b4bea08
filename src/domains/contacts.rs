//! Contacts and their phone numbers

use serde::{Deserialize, Serialize};

use super::handler::{DomainFilter, SearchHandler};
use super::types::{Domain, IdentityKey, Searchable};
use crate::actions::{ContactMethod, RowId};

/// One phone number of a contact, with the provider rows that carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Contacts-provider data rows recorded against this number
    /// (the phone row plus any messaging/calling app rows)
    #[serde(default)]
    pub row_ids: Vec<RowId>,
}

impl PhoneNumber {
    pub fn new(number: impl Into<String>) -> Self {
        PhoneNumber {
            number: number.into(),
            label: None,
            row_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEntry {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub methods: Vec<ContactMethod>,
    #[serde(default)]
    pub starred: bool,
}

impl ContactEntry {
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        ContactEntry {
            id,
            display_name: display_name.into(),
            phone_numbers: Vec::new(),
            emails: Vec::new(),
            methods: Vec::new(),
            starred: false,
        }
    }

    pub fn has_phone(&self) -> bool {
        !self.phone_numbers.is_empty()
    }
}

impl Searchable for ContactEntry {
    const DOMAIN: Domain = Domain::Contacts;

    fn identity(&self) -> IdentityKey {
        IdentityKey::contact(self.id)
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn match_fields(&self) -> Vec<&str> {
        vec![self.display_name.as_str()]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFilter;

impl DomainFilter<ContactEntry> for ContactFilter {}

pub type ContactSearchHandler = SearchHandler<ContactEntry, ContactFilter>;
