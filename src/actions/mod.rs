//! Actions - turning a contact result into a launchable channel
//!
//! # Module Structure
//!
//! - `methods` - the closed `ContactMethod` set and provider row classification
//! - `channels` - `MessagingApp` / `CallingApp`
//! - `resolver` - default-app resolution with single-level fallback
//! - `call_flow` - picker, direct-dial prompt and permission steps of a call
//! - `pending` - WhatsApp/Signal calls parked until the permission callback
//! - `intents` - `LaunchIntent` construction
//! - `preferences` - persisted channel preferences
//! - `permissions` - permission seam and prompt policy

mod call_flow;
mod channels;
mod failure;
mod intents;
mod methods;
mod pending;
mod permissions;
mod preferences;
mod resolver;

pub use call_flow::{CallFlow, CallFlowStep, CallOutcome};
pub use channels::{
    CallingApp, MessagingApp, GOOGLE_MEET_PACKAGE, SIGNAL_PACKAGE, TELEGRAM_PACKAGE,
    WHATSAPP_PACKAGE,
};
pub use failure::ActionFailure;
pub use intents::{IntentAction, LaunchIntent};
pub use methods::{mime, ContactMethod, MethodData, RowId};
pub use pending::{PendingAction, PendingActionSlot, PendingKind};
pub use permissions::{
    contacts_permission_prompt, Permission, PermissionChecker, PermissionPrompt,
    StaticPermissions,
};
pub use preferences::{ChannelPreferences, ChannelSettings};
pub use resolver::{ChannelResolver, InstalledPackages, PackageRegistry, PhoneRowIndex};

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
