//! `SearchKit` - the search core facade
//!
//! Wires the five domain handlers to one customization overlay, the channel
//! preferences and resolver, and the recent-activity ledger. Everything the
//! platform glue needs goes through here.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use crate::actions::{
    ActionFailure, CallFlow, CallingApp, ChannelResolver, ChannelSettings, ContactMethod,
    LaunchIntent, MessagingApp, PackageRegistry, PendingAction, PendingActionSlot, Permission,
    PermissionChecker,
};
use crate::config::Config;
use crate::customization::{CustomizationOverlay, MutationOutcome, PreferenceStore, Preferences};
use crate::domains::{
    AppFilter, AppSearchHandler, ContactEntry, ContactFilter, ContactSearchHandler, Domain,
    FileFilter, FileSearchHandler, IdentityKey, IntoEntity, Searchable, SearchableEntity,
    SettingFilter, SettingSearchHandler, ShortcutFilter, ShortcutSearchHandler,
};
use crate::error::{Result, ResultExt};
use crate::recent::{RecentEntry, RecentLedger};

/// Platform collaborators injected into the engine
pub struct Platform {
    pub preferences: Arc<dyn PreferenceStore>,
    pub packages: Arc<dyn PackageRegistry>,
    pub permissions: Arc<dyn PermissionChecker>,
}

/// Ranked results of one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainResults {
    pub domain: Domain,
    pub results: Vec<SearchableEntity>,
}

/// What to do for an app-backed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallLaunch {
    Launch(LaunchIntent),
    /// Parked until [`SearchKit::on_call_permission_result`]
    AwaitingPermission(Permission),
}

fn into_entities<T: Searchable + Clone + IntoEntity>(items: Vec<Arc<T>>) -> Vec<SearchableEntity> {
    items
        .into_iter()
        .map(|item| Arc::unwrap_or_clone(item).into_entity())
        .collect()
}

pub struct SearchKit {
    overlay: Arc<CustomizationOverlay>,
    apps: AppSearchHandler,
    contacts: ContactSearchHandler,
    files: FileSearchHandler,
    settings: SettingSearchHandler,
    shortcuts: ShortcutSearchHandler,
    channels: Arc<ChannelSettings>,
    resolver: ChannelResolver,
    permissions: Arc<dyn PermissionChecker>,
    pending: PendingActionSlot,
    recent: Mutex<RecentLedger>,
}

impl SearchKit {
    /// Build the engine; unreadable preferences or recents start empty
    #[instrument(name = "search_kit_init", skip_all)]
    pub fn new(config: &Config, platform: Platform, mut recent: RecentLedger) -> Self {
        let preferences = platform.preferences.load().warn_on_err().unwrap_or_else(|| {
            warn!("Starting with default preferences");
            Preferences::default()
        });
        recent.load().warn_on_err();

        let overlay = Arc::new(CustomizationOverlay::new(
            preferences.customizations,
            platform.preferences.clone(),
        ));
        let search = &config.search;
        let min_len = search.min_query_length;

        let kit = SearchKit {
            apps: AppSearchHandler::new(
                overlay.clone(),
                AppFilter,
                min_len,
                search.limit_for(Domain::Apps),
            ),
            contacts: ContactSearchHandler::new(
                overlay.clone(),
                ContactFilter,
                min_len,
                search.limit_for(Domain::Contacts),
            ),
            files: FileSearchHandler::new(
                overlay.clone(),
                FileFilter::from_config(&config.files),
                min_len,
                search.limit_for(Domain::Files),
            ),
            settings: SettingSearchHandler::new(
                overlay.clone(),
                SettingFilter::new(config.settings.disabled_ids.iter().cloned()),
                min_len,
                search.limit_for(Domain::Settings),
            ),
            shortcuts: ShortcutSearchHandler::new(
                overlay.clone(),
                ShortcutFilter::new(config.shortcuts.disabled_ids.iter().cloned()),
                min_len,
                search.limit_for(Domain::Shortcuts),
            ),
            overlay,
            channels: Arc::new(ChannelSettings::new(
                preferences.channels,
                platform.preferences,
            )),
            resolver: ChannelResolver::new(platform.packages),
            permissions: platform.permissions,
            pending: PendingActionSlot::new(),
            recent: Mutex::new(recent),
        };
        info!(min_query_length = min_len, "Search kit ready");
        kit
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    pub fn apps(&self) -> &AppSearchHandler {
        &self.apps
    }

    pub fn contacts(&self) -> &ContactSearchHandler {
        &self.contacts
    }

    pub fn files(&self) -> &FileSearchHandler {
        &self.files
    }

    pub fn settings(&self) -> &SettingSearchHandler {
        &self.settings
    }

    pub fn shortcuts(&self) -> &ShortcutSearchHandler {
        &self.shortcuts
    }

    pub fn overlay(&self) -> &CustomizationOverlay {
        &self.overlay
    }

    pub fn channels(&self) -> &ChannelSettings {
        &self.channels
    }

    pub fn set_disabled_settings(&self, ids: Vec<String>) {
        self.settings.update_filter(|f| f.set_disabled_ids(ids));
    }

    pub fn set_disabled_shortcuts(&self, ids: Vec<String>) {
        self.shortcuts.update_filter(|f| f.set_disabled_ids(ids));
    }

    /// Replace one domain's candidates from a mixed list; entities of other
    /// domains are ignored
    pub fn replace_candidates(&self, domain: Domain, entities: Vec<SearchableEntity>) -> bool {
        macro_rules! collect {
            ($variant:ident) => {
                entities
                    .into_iter()
                    .filter_map(|e| match e {
                        SearchableEntity::$variant(item) => Some(item),
                        _ => None,
                    })
                    .collect()
            };
        }
        match domain {
            Domain::Apps => self.apps.replace_candidates(collect!(App)),
            Domain::Contacts => self.contacts.replace_candidates(collect!(Contact)),
            Domain::Files => self.files.replace_candidates(collect!(File)),
            Domain::Settings => self.settings.replace_candidates(collect!(Setting)),
            Domain::Shortcuts => self.shortcuts.replace_candidates(collect!(Shortcut)),
        }
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn search(&self, domain: Domain, query: &str) -> Vec<SearchableEntity> {
        match domain {
            Domain::Apps => into_entities(self.apps.search(query)),
            Domain::Contacts => into_entities(self.contacts.search(query)),
            Domain::Files => into_entities(self.files.search(query)),
            Domain::Settings => into_entities(self.settings.search(query)),
            Domain::Shortcuts => into_entities(self.shortcuts.search(query)),
        }
    }

    /// Non-empty domains in presentation order
    pub fn search_all(&self, query: &str) -> Vec<DomainResults> {
        Domain::ALL
            .into_iter()
            .map(|domain| DomainResults {
                domain,
                results: self.search(domain, query),
            })
            .filter(|section| !section.results.is_empty())
            .collect()
    }

    /// (pinned, excluded), both alphabetical
    pub fn pinned_and_excluded(
        &self,
        domain: Domain,
    ) -> (Vec<SearchableEntity>, Vec<SearchableEntity>) {
        match domain {
            Domain::Apps => (into_entities(self.apps.pinned()), into_entities(self.apps.excluded())),
            Domain::Contacts => (
                into_entities(self.contacts.pinned()),
                into_entities(self.contacts.excluded()),
            ),
            Domain::Files => (into_entities(self.files.pinned()), into_entities(self.files.excluded())),
            Domain::Settings => (
                into_entities(self.settings.pinned()),
                into_entities(self.settings.excluded()),
            ),
            Domain::Shortcuts => (
                into_entities(self.shortcuts.pinned()),
                into_entities(self.shortcuts.excluded()),
            ),
        }
    }

    // ------------------------------------------------------------------
    // Customization
    // ------------------------------------------------------------------

    pub fn pin(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.overlay.pin(domain, key)
    }

    pub fn unpin(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.overlay.unpin(domain, key)
    }

    pub fn exclude(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.overlay.exclude(domain, key)
    }

    pub fn include(&self, domain: Domain, key: &IdentityKey) -> Result<MutationOutcome> {
        self.overlay.include(domain, key)
    }

    pub fn set_nickname(
        &self,
        domain: Domain,
        key: &IdentityKey,
        nickname: Option<&str>,
    ) -> Result<MutationOutcome> {
        self.overlay.set_nickname(domain, key, nickname)
    }

    pub fn clear_all_excluded(&self, domain: Domain) -> Result<MutationOutcome> {
        self.overlay.clear_all_excluded(domain)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    pub fn resolve_messaging_channel(&self, contact: &ContactEntry) -> MessagingApp {
        self.resolver
            .resolve_messaging_channel(contact, self.channels.messaging_app())
    }

    pub fn resolve_calling_channel(
        &self,
        contact: &ContactEntry,
        phone_number: Option<&str>,
    ) -> CallingApp {
        self.resolver
            .resolve_calling_channel(contact, self.channels.calling_app(), phone_number)
    }

    /// Intent for "message this contact" through the resolved channel
    pub fn message_intent(
        &self,
        contact: &ContactEntry,
    ) -> std::result::Result<LaunchIntent, ActionFailure> {
        match self.resolve_messaging_channel(contact) {
            MessagingApp::Messages => {
                let number = contact
                    .methods
                    .iter()
                    .find_map(|m| match m {
                        ContactMethod::Sms(d) => Some(d.datum.as_str()),
                        _ => None,
                    })
                    .or_else(|| contact.phone_numbers.first().map(|p| p.number.as_str()))
                    .ok_or(ActionFailure::NoPhoneNumber)?;
                LaunchIntent::sms(number)
            }
            app => {
                let method = self.resolver.messaging_method(contact, app)?;
                LaunchIntent::for_method(method, self.resolver.packages())
            }
        }
    }

    /// Start the dialer flow for a contact
    pub fn start_call(&self, contact: &ContactEntry) -> CallFlow {
        CallFlow::new(
            contact.clone(),
            self.channels.clone(),
            self.permissions.clone(),
        )
    }

    /// Launch an app-backed call (voice or video).
    ///
    /// WhatsApp and Signal calls without the call permission are parked and
    /// resumed by [`on_call_permission_result`](Self::on_call_permission_result).
    pub fn app_call(
        &self,
        contact: &ContactEntry,
        app: CallingApp,
        phone_number: Option<&str>,
        video: bool,
    ) -> std::result::Result<CallLaunch, ActionFailure> {
        let method = self
            .resolver
            .calling_method(contact, app, phone_number, video)?;
        if method.requires_call_permission()
            && !self.permissions.has_permission(Permission::CallPhone)
        {
            if let Some(pending) = PendingAction::from_method(method)? {
                self.pending.store(pending);
                return Ok(CallLaunch::AwaitingPermission(Permission::CallPhone));
            }
        }
        LaunchIntent::for_method(method, self.resolver.packages()).map(CallLaunch::Launch)
    }

    /// Permission callback for a parked app call; consumes it either way
    pub fn on_call_permission_result(
        &self,
        granted: bool,
    ) -> std::result::Result<LaunchIntent, ActionFailure> {
        let pending = self.pending.on_permission_result(granted)?;
        LaunchIntent::for_method(&pending.to_method(), self.resolver.packages())
    }

    // ------------------------------------------------------------------
    // Recent activity
    // ------------------------------------------------------------------

    /// Record and persist; a failed save is logged, the entry is kept
    pub fn record_recent(&self, entry: RecentEntry) {
        let mut recent = self.recent.lock();
        if recent.record(entry) {
            recent.save().warn_on_err();
        }
    }

    pub fn recent(&self) -> Vec<RecentEntry> {
        self.recent.lock().entries().to_vec()
    }

    pub fn delete_recent(&self, entry: &RecentEntry) -> bool {
        let mut recent = self.recent.lock();
        let removed = recent.delete(entry);
        if removed {
            recent.save().warn_on_err();
        }
        removed
    }

    pub fn clear_recent(&self) {
        let mut recent = self.recent.lock();
        recent.clear();
        recent.save().warn_on_err();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
