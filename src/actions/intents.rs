//! Launch intents handed to the platform glue

use serde::{Deserialize, Serialize};

use super::failure::ActionFailure;
use super::methods::ContactMethod;
use super::resolver::PackageRegistry;

const CONTACTS_DATA_URI: &str = "content://com.android.contacts/data";
const CONTACTS_LOOKUP_URI: &str = "content://com.android.contacts/contacts/lookup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentAction {
    /// Open the dialer with the number filled in
    Dial,
    /// Place the call directly (needs the call permission)
    Call,
    SendTo,
    View,
}

impl IntentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentAction::Dial => "android.intent.action.DIAL",
            IntentAction::Call => "android.intent.action.CALL",
            IntentAction::SendTo => "android.intent.action.SENDTO",
            IntentAction::View => "android.intent.action.VIEW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchIntent {
    pub action: IntentAction,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

fn non_empty(datum: &str) -> Result<&str, ActionFailure> {
    let datum = datum.trim();
    if datum.is_empty() {
        Err(ActionFailure::EmptyDatum)
    } else {
        Ok(datum)
    }
}

impl LaunchIntent {
    fn new(action: IntentAction, uri: String) -> Self {
        LaunchIntent {
            action,
            uri,
            package: None,
            mime_type: None,
        }
    }

    pub fn dial(number: &str) -> Result<Self, ActionFailure> {
        Ok(Self::new(IntentAction::Dial, format!("tel:{}", non_empty(number)?)))
    }

    pub fn call(number: &str) -> Result<Self, ActionFailure> {
        Ok(Self::new(IntentAction::Call, format!("tel:{}", non_empty(number)?)))
    }

    pub fn sms(number: &str) -> Result<Self, ActionFailure> {
        Ok(Self::new(IntentAction::SendTo, format!("smsto:{}", non_empty(number)?)))
    }

    pub fn email(address: &str) -> Result<Self, ActionFailure> {
        Ok(Self::new(IntentAction::SendTo, format!("mailto:{}", non_empty(address)?)))
    }

    pub fn view_contact(lookup_key: &str) -> Result<Self, ActionFailure> {
        Ok(Self::new(
            IntentAction::View,
            format!("{}/{}", CONTACTS_LOOKUP_URI, non_empty(lookup_key)?),
        ))
    }

    /// Intent for one contact method.
    ///
    /// App-backed methods need the app installed and a provider row id.
    pub fn for_method(
        method: &ContactMethod,
        packages: &dyn PackageRegistry,
    ) -> Result<Self, ActionFailure> {
        match method {
            ContactMethod::Phone(d) => Self::dial(&d.datum),
            ContactMethod::Sms(d) => Self::sms(&d.datum),
            ContactMethod::Email(d) => Self::email(&d.datum),
            ContactMethod::ViewInContactsApp(d) => Self::view_contact(&d.datum),
            _ => Self::provider_row(method, packages),
        }
    }

    fn provider_row(
        method: &ContactMethod,
        packages: &dyn PackageRegistry,
    ) -> Result<Self, ActionFailure> {
        if let Some(package) = method.package() {
            if !packages.is_app_installed(package) {
                return Err(ActionFailure::AppNotInstalled {
                    package: package.to_string(),
                });
            }
        }
        let row_id = method.row_id().ok_or(ActionFailure::MissingProviderRow)?;
        Ok(LaunchIntent {
            action: IntentAction::View,
            uri: format!("{}/{}", CONTACTS_DATA_URI, row_id),
            package: method.package().map(str::to_string),
            mime_type: method.mime_type().map(str::to_string),
        })
    }
}
