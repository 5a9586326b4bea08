//! Channel resolution: which app actually handles "message" / "call"
//!
//! The user's default app wins only when it is installed and the contact
//! can be reached through it; otherwise the universal channel is used.
//! There is no second-choice app.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use super::channels::{CallingApp, MessagingApp};
use super::failure::ActionFailure;
use super::methods::{ContactMethod, RowId};
use crate::domains::ContactEntry;
use crate::phone::is_same_number;

/// Platform package registry
pub trait PackageRegistry: Send + Sync {
    fn is_app_installed(&self, package: &str) -> bool;
}

/// Registry backed by a fixed package list
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: HashSet<String>,
}

impl InstalledPackages {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InstalledPackages {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PackageRegistry for InstalledPackages {
    fn is_app_installed(&self, package: &str) -> bool {
        self.packages.contains(package)
    }
}

/// Provider row ids per phone number of one contact, built once.
///
/// Providers link app rows to a number only through row ids, and one contact
/// can own several numbers, so methods are scoped by row-id membership.
#[derive(Debug, Clone, Default)]
pub struct PhoneRowIndex {
    rows: HashMap<String, HashSet<RowId>>,
}

impl PhoneRowIndex {
    pub fn for_contact(contact: &ContactEntry) -> Self {
        let mut rows: HashMap<String, HashSet<RowId>> = HashMap::new();
        for phone in &contact.phone_numbers {
            rows.entry(phone.number.clone())
                .or_default()
                .extend(phone.row_ids.iter().copied());
        }
        PhoneRowIndex { rows }
    }

    /// Union of the row ids of every stored number equivalent to `number`
    pub fn rows_for(&self, number: &str) -> HashSet<RowId> {
        self.rows
            .iter()
            .filter(|(stored, _)| is_same_number(stored, number))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    /// Whether `method` belongs to `number`: by row id, else by its datum
    pub fn method_matches(&self, method: &ContactMethod, number: &str) -> bool {
        if let Some(row_id) = method.row_id() {
            if self.rows_for(number).contains(&row_id) {
                return true;
            }
        }
        is_same_number(method.datum(), number)
    }
}

pub struct ChannelResolver {
    packages: Arc<dyn PackageRegistry>,
}

impl ChannelResolver {
    pub fn new(packages: Arc<dyn PackageRegistry>) -> Self {
        ChannelResolver { packages }
    }

    pub fn packages(&self) -> &dyn PackageRegistry {
        self.packages.as_ref()
    }

    fn installed(&self, package: Option<&str>) -> bool {
        package.map_or(true, |p| self.packages.is_app_installed(p))
    }

    pub fn resolve_messaging_channel(
        &self,
        contact: &ContactEntry,
        default_app: MessagingApp,
    ) -> MessagingApp {
        if default_app == MessagingApp::Messages {
            return MessagingApp::Messages;
        }
        let reachable = contact
            .methods
            .iter()
            .any(|m| m.messaging_app() == Some(default_app));
        let resolved = if self.installed(default_app.package_name()) && reachable {
            default_app
        } else {
            MessagingApp::Messages
        };
        debug!(contact_id = contact.id, default = %default_app, resolved = %resolved, "Resolved messaging channel");
        resolved
    }

    /// Like messaging, optionally scoped to one of the contact's numbers
    pub fn resolve_calling_channel(
        &self,
        contact: &ContactEntry,
        default_app: CallingApp,
        phone_number: Option<&str>,
    ) -> CallingApp {
        if default_app == CallingApp::Call {
            return CallingApp::Call;
        }
        let reachable = !self
            .calling_methods(contact, default_app, phone_number)
            .is_empty();
        let resolved = if self.installed(default_app.package_name()) && reachable {
            default_app
        } else {
            CallingApp::Call
        };
        debug!(contact_id = contact.id, default = %default_app, resolved = %resolved, scoped = phone_number.is_some(), "Resolved calling channel");
        resolved
    }

    /// Methods of `app`, restricted to `phone_number` when given
    pub fn calling_methods<'a>(
        &self,
        contact: &'a ContactEntry,
        app: CallingApp,
        phone_number: Option<&str>,
    ) -> Vec<&'a ContactMethod> {
        let of_app = contact
            .methods
            .iter()
            .filter(move |m| m.calling_app() == Some(app));
        match phone_number {
            None => of_app.collect(),
            Some(number) => {
                let index = PhoneRowIndex::for_contact(contact);
                of_app.filter(|m| index.method_matches(m, number)).collect()
            }
        }
    }

    /// Pick the method that launches `app` (voice or video) for a contact
    pub fn calling_method<'a>(
        &self,
        contact: &'a ContactEntry,
        app: CallingApp,
        phone_number: Option<&str>,
        video: bool,
    ) -> Result<&'a ContactMethod, ActionFailure> {
        if let Some(package) = app.package_name() {
            if !self.packages.is_app_installed(package) {
                return Err(ActionFailure::AppNotInstalled {
                    package: package.to_string(),
                });
            }
        }
        self.calling_methods(contact, app, phone_number)
            .into_iter()
            .find(|m| !app.has_separate_video() || m.is_video_call() == video)
            .ok_or(ActionFailure::NoMatchingMethod)
    }

    /// Pick the method that launches `app` for messaging
    pub fn messaging_method<'a>(
        &self,
        contact: &'a ContactEntry,
        app: MessagingApp,
    ) -> Result<&'a ContactMethod, ActionFailure> {
        if let Some(package) = app.package_name() {
            if !self.packages.is_app_installed(package) {
                return Err(ActionFailure::AppNotInstalled {
                    package: package.to_string(),
                });
            }
        }
        contact
            .methods
            .iter()
            .find(|m| m.messaging_app() == Some(app))
            .ok_or(ActionFailure::NoMatchingMethod)
    }
}
