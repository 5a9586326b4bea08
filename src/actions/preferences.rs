//! Per-install channel preferences

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::channels::{CallingApp, MessagingApp};
use crate::customization::{PreferenceChange, PreferenceStore};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPreferences {
    #[serde(default)]
    pub messaging_app: MessagingApp,
    #[serde(default)]
    pub calling_app: CallingApp,
    /// Contact id -> remembered number for the call picker
    #[serde(default)]
    pub preferred_numbers: BTreeMap<i64, String>,
    /// One-time direct-dial prompt gate, global for the install
    #[serde(default)]
    pub first_call_prompt_seen: bool,
    #[serde(default)]
    pub direct_dial_enabled: bool,
}

/// Channel preferences with write-through persistence.
///
/// Like the overlay, the in-memory value changes first; a failed write is
/// returned but not rolled back.
pub struct ChannelSettings {
    prefs: Mutex<ChannelPreferences>,
    store: Arc<dyn PreferenceStore>,
}

impl ChannelSettings {
    pub fn new(prefs: ChannelPreferences, store: Arc<dyn PreferenceStore>) -> Self {
        ChannelSettings {
            prefs: Mutex::new(prefs),
            store,
        }
    }

    pub fn snapshot(&self) -> ChannelPreferences {
        self.prefs.lock().clone()
    }

    pub fn messaging_app(&self) -> MessagingApp {
        self.prefs.lock().messaging_app
    }

    pub fn calling_app(&self) -> CallingApp {
        self.prefs.lock().calling_app
    }

    pub fn preferred_number(&self, contact_id: i64) -> Option<String> {
        self.prefs.lock().preferred_numbers.get(&contact_id).cloned()
    }

    pub fn first_call_prompt_seen(&self) -> bool {
        self.prefs.lock().first_call_prompt_seen
    }

    pub fn direct_dial_enabled(&self) -> bool {
        self.prefs.lock().direct_dial_enabled
    }

    pub fn set_messaging_app(&self, app: MessagingApp) -> Result<()> {
        self.update(PreferenceChange::MessagingApp { app }, |p| {
            std::mem::replace(&mut p.messaging_app, app) != app
        })
    }

    pub fn set_calling_app(&self, app: CallingApp) -> Result<()> {
        self.update(PreferenceChange::CallingApp { app }, |p| {
            std::mem::replace(&mut p.calling_app, app) != app
        })
    }

    pub fn set_preferred_number(&self, contact_id: i64, number: &str) -> Result<()> {
        let number = number.trim().to_string();
        let change = PreferenceChange::PreferredNumber {
            contact_id,
            number: Some(number.clone()),
        };
        self.update(change, |p| {
            p.preferred_numbers.insert(contact_id, number.clone()).as_ref() != Some(&number)
        })
    }

    pub fn clear_preferred_number(&self, contact_id: i64) -> Result<()> {
        let change = PreferenceChange::PreferredNumber {
            contact_id,
            number: None,
        };
        self.update(change, |p| p.preferred_numbers.remove(&contact_id).is_some())
    }

    pub fn mark_first_call_prompt_seen(&self) -> Result<()> {
        self.update(PreferenceChange::FirstCallPromptSeen, |p| {
            !std::mem::replace(&mut p.first_call_prompt_seen, true)
        })
    }

    pub fn set_direct_dial_enabled(&self, enabled: bool) -> Result<()> {
        self.update(PreferenceChange::DirectDial { enabled }, |p| {
            std::mem::replace(&mut p.direct_dial_enabled, enabled) != enabled
        })
    }

    /// Apply `op` (returns whether anything changed) and persist if it did
    fn update(
        &self,
        change: PreferenceChange,
        op: impl FnOnce(&mut ChannelPreferences) -> bool,
    ) -> Result<()> {
        let mut prefs = self.prefs.lock();
        if !op(&mut *prefs) {
            return Ok(());
        }
        info!(?change, "Channel preference changed");
        self.store.record(&change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customization::MemoryPreferenceStore;

    fn settings() -> (ChannelSettings, Arc<MemoryPreferenceStore>) {
        let store = Arc::new(MemoryPreferenceStore::new());
        (
            ChannelSettings::new(ChannelPreferences::default(), store.clone()),
            store,
        )
    }

    #[test]
    fn test_defaults_are_universal_channels() {
        let (settings, _) = settings();
        assert_eq!(settings.messaging_app(), MessagingApp::Messages);
        assert_eq!(settings.calling_app(), CallingApp::Call);
        assert!(!settings.first_call_prompt_seen());
        assert!(!settings.direct_dial_enabled());
    }

    #[test]
    fn test_changes_persist_once() {
        let (settings, store) = settings();
        settings.set_messaging_app(MessagingApp::WhatsApp).unwrap();
        settings.set_messaging_app(MessagingApp::WhatsApp).unwrap();
        settings.mark_first_call_prompt_seen().unwrap();
        settings.mark_first_call_prompt_seen().unwrap();
        assert_eq!(
            store.changes(),
            vec![
                PreferenceChange::MessagingApp {
                    app: MessagingApp::WhatsApp
                },
                PreferenceChange::FirstCallPromptSeen,
            ]
        );
    }

    #[test]
    fn test_preferred_number_set_and_clear() {
        let (settings, store) = settings();
        settings.set_preferred_number(7, " +14155550123 ").unwrap();
        assert_eq!(settings.preferred_number(7).as_deref(), Some("+14155550123"));
        settings.clear_preferred_number(7).unwrap();
        settings.clear_preferred_number(7).unwrap();
        assert_eq!(settings.preferred_number(7), None);
        assert_eq!(store.changes().len(), 2);
    }
}
