//! Customization data kept alongside (never inside) the candidate lists

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::actions::{CallingApp, ChannelPreferences, MessagingApp};
use crate::domains::{Domain, IdentityKey};

/// Pins, exclusions and nicknames for one domain.
///
/// `pinned` and `excluded` never share a key once the overlay has touched them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCustomizations {
    #[serde(default)]
    pub pinned: BTreeSet<IdentityKey>,
    #[serde(default)]
    pub excluded: BTreeSet<IdentityKey>,
    #[serde(default)]
    pub nicknames: BTreeMap<IdentityKey, String>,
}

impl DomainCustomizations {
    pub fn is_pinned(&self, key: &IdentityKey) -> bool {
        self.pinned.contains(key)
    }

    pub fn is_excluded(&self, key: &IdentityKey) -> bool {
        self.excluded.contains(key)
    }

    pub fn nickname(&self, key: &IdentityKey) -> Option<&str> {
        self.nicknames.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.excluded.is_empty() && self.nicknames.is_empty()
    }

    /// Keys present in both sets; empty whenever the overlay is consistent
    pub(crate) fn conflicts(&self) -> Vec<&IdentityKey> {
        self.pinned.intersection(&self.excluded).collect()
    }
}

/// Customizations for every domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomizationState {
    domains: BTreeMap<Domain, DomainCustomizations>,
}

impl CustomizationState {
    pub fn domain(&self, domain: Domain) -> Option<&DomainCustomizations> {
        self.domains.get(&domain)
    }

    pub fn domain_mut(&mut self, domain: Domain) -> &mut DomainCustomizations {
        self.domains.entry(domain).or_default()
    }

    /// Drop keys that are both pinned and excluded from pins.
    ///
    /// Hand-edited or legacy files can contain such keys; exclusion wins.
    pub fn repair(&mut self) -> usize {
        let mut repaired = 0;
        for customizations in self.domains.values_mut() {
            let conflicting: Vec<IdentityKey> =
                customizations.conflicts().into_iter().cloned().collect();
            for key in conflicting {
                customizations.pinned.remove(&key);
                repaired += 1;
            }
        }
        repaired
    }
}

/// A single persisted preference mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum PreferenceChange {
    Pinned { domain: Domain, key: IdentityKey },
    Unpinned { domain: Domain, key: IdentityKey },
    Excluded { domain: Domain, key: IdentityKey },
    Included { domain: Domain, key: IdentityKey },
    ExcludedCleared { domain: Domain },
    Nickname {
        domain: Domain,
        key: IdentityKey,
        nickname: Option<String>,
    },
    MessagingApp { app: MessagingApp },
    CallingApp { app: CallingApp },
    PreferredNumber {
        contact_id: i64,
        number: Option<String>,
    },
    FirstCallPromptSeen,
    DirectDial { enabled: bool },
}

/// Everything the preference store persists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub customizations: CustomizationState,
    #[serde(default)]
    pub channels: ChannelPreferences,
}

impl Preferences {
    /// Fold one change into the document
    pub fn apply(&mut self, change: &PreferenceChange) {
        match change {
            PreferenceChange::Pinned { domain, key } => {
                self.customizations.domain_mut(*domain).pinned.insert(key.clone());
            }
            PreferenceChange::Unpinned { domain, key } => {
                self.customizations.domain_mut(*domain).pinned.remove(key);
            }
            PreferenceChange::Excluded { domain, key } => {
                self.customizations.domain_mut(*domain).excluded.insert(key.clone());
            }
            PreferenceChange::Included { domain, key } => {
                self.customizations.domain_mut(*domain).excluded.remove(key);
            }
            PreferenceChange::ExcludedCleared { domain } => {
                self.customizations.domain_mut(*domain).excluded.clear();
            }
            PreferenceChange::Nickname {
                domain,
                key,
                nickname,
            } => {
                let nicknames = &mut self.customizations.domain_mut(*domain).nicknames;
                match nickname {
                    Some(nickname) => {
                        nicknames.insert(key.clone(), nickname.clone());
                    }
                    None => {
                        nicknames.remove(key);
                    }
                }
            }
            PreferenceChange::MessagingApp { app } => self.channels.messaging_app = *app,
            PreferenceChange::CallingApp { app } => self.channels.calling_app = *app,
            PreferenceChange::PreferredNumber { contact_id, number } => match number {
                Some(number) => {
                    self.channels
                        .preferred_numbers
                        .insert(*contact_id, number.clone());
                }
                None => {
                    self.channels.preferred_numbers.remove(contact_id);
                }
            },
            PreferenceChange::FirstCallPromptSeen => self.channels.first_call_prompt_seen = true,
            PreferenceChange::DirectDial { enabled } => {
                self.channels.direct_dial_enabled = *enabled
            }
        }
    }
}
