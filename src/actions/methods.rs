//! Contact methods: the concrete ways a contact can be reached
//!
//! Each variant carries the provider datum (number, address, handle) and,
//! for app-backed methods, the contacts-provider data row that launches it.

use serde::{Deserialize, Serialize};

use super::channels::{
    CallingApp, MessagingApp, GOOGLE_MEET_PACKAGE, SIGNAL_PACKAGE, TELEGRAM_PACKAGE,
    WHATSAPP_PACKAGE,
};

/// Contacts-provider data row id
pub type RowId = i64;

/// Provider mime types for the rows each method is read from
pub mod mime {
    pub const PHONE: &str = "vnd.android.cursor.item/phone_v2";
    pub const EMAIL: &str = "vnd.android.cursor.item/email_v2";
    pub const WHATSAPP_MESSAGE: &str = "vnd.android.cursor.item/vnd.com.whatsapp.profile";
    pub const WHATSAPP_CALL: &str = "vnd.android.cursor.item/vnd.com.whatsapp.voip.call";
    pub const WHATSAPP_VIDEO_CALL: &str = "vnd.android.cursor.item/vnd.com.whatsapp.video.call";
    pub const TELEGRAM_MESSAGE: &str =
        "vnd.android.cursor.item/vnd.org.telegram.messenger.android.profile";
    pub const TELEGRAM_CALL: &str = "vnd.android.cursor.item/vnd.org.telegram.messenger.android.call";
    pub const TELEGRAM_VIDEO_CALL: &str =
        "vnd.android.cursor.item/vnd.org.telegram.messenger.android.call.video";
    pub const SIGNAL_MESSAGE: &str = "vnd.android.cursor.item/vnd.org.thoughtcrime.securesms.contact";
    pub const SIGNAL_CALL: &str = "vnd.android.cursor.item/vnd.org.thoughtcrime.securesms.call";
    pub const SIGNAL_VIDEO_CALL: &str =
        "vnd.android.cursor.item/vnd.org.thoughtcrime.securesms.videocall";
    pub const GOOGLE_MEET: &str = "vnd.android.cursor.item/com.google.android.apps.tachyon.phone";
    pub const VIDEO_CALL: &str = "vnd.android.cursor.item/video_call";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodData {
    pub datum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<RowId>,
}

impl MethodData {
    pub fn new(datum: impl Into<String>, row_id: Option<RowId>) -> Self {
        MethodData {
            datum: datum.into(),
            row_id,
        }
    }
}

/// Closed set of reachability methods; every capability query matches on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContactMethod {
    Phone(MethodData),
    Sms(MethodData),
    Email(MethodData),
    WhatsAppMessage(MethodData),
    WhatsAppCall(MethodData),
    WhatsAppVideoCall(MethodData),
    TelegramMessage(MethodData),
    TelegramCall(MethodData),
    TelegramVideoCall(MethodData),
    SignalMessage(MethodData),
    SignalCall(MethodData),
    SignalVideoCall(MethodData),
    GoogleMeet(MethodData),
    GenericVideoCall(MethodData),
    #[serde(rename_all = "camelCase")]
    CustomApp {
        package: String,
        label: String,
        mime_type: String,
        #[serde(flatten)]
        data: MethodData,
    },
    /// Datum is the contact lookup key
    ViewInContactsApp(MethodData),
}

impl ContactMethod {
    pub fn data(&self) -> &MethodData {
        match self {
            ContactMethod::Phone(d)
            | ContactMethod::Sms(d)
            | ContactMethod::Email(d)
            | ContactMethod::WhatsAppMessage(d)
            | ContactMethod::WhatsAppCall(d)
            | ContactMethod::WhatsAppVideoCall(d)
            | ContactMethod::TelegramMessage(d)
            | ContactMethod::TelegramCall(d)
            | ContactMethod::TelegramVideoCall(d)
            | ContactMethod::SignalMessage(d)
            | ContactMethod::SignalCall(d)
            | ContactMethod::SignalVideoCall(d)
            | ContactMethod::GoogleMeet(d)
            | ContactMethod::GenericVideoCall(d)
            | ContactMethod::ViewInContactsApp(d) => d,
            ContactMethod::CustomApp { data, .. } => data,
        }
    }

    pub fn datum(&self) -> &str {
        &self.data().datum
    }

    pub fn row_id(&self) -> Option<RowId> {
        self.data().row_id
    }

    /// Messaging channel this method serves, if any
    pub fn messaging_app(&self) -> Option<MessagingApp> {
        match self {
            ContactMethod::Sms(_) => Some(MessagingApp::Messages),
            ContactMethod::WhatsAppMessage(_) => Some(MessagingApp::WhatsApp),
            ContactMethod::TelegramMessage(_) => Some(MessagingApp::Telegram),
            ContactMethod::SignalMessage(_) => Some(MessagingApp::Signal),
            _ => None,
        }
    }

    /// Calling channel this method serves (voice or video), if any
    pub fn calling_app(&self) -> Option<CallingApp> {
        match self {
            ContactMethod::Phone(_) => Some(CallingApp::Call),
            ContactMethod::WhatsAppCall(_) | ContactMethod::WhatsAppVideoCall(_) => {
                Some(CallingApp::WhatsApp)
            }
            ContactMethod::TelegramCall(_) | ContactMethod::TelegramVideoCall(_) => {
                Some(CallingApp::Telegram)
            }
            ContactMethod::SignalCall(_) | ContactMethod::SignalVideoCall(_) => {
                Some(CallingApp::Signal)
            }
            ContactMethod::GoogleMeet(_) => Some(CallingApp::GoogleMeet),
            _ => None,
        }
    }

    pub fn is_video_call(&self) -> bool {
        matches!(
            self,
            ContactMethod::WhatsAppVideoCall(_)
                | ContactMethod::TelegramVideoCall(_)
                | ContactMethod::SignalVideoCall(_)
                | ContactMethod::GoogleMeet(_)
                | ContactMethod::GenericVideoCall(_)
        )
    }

    /// WhatsApp and Signal calls go through the phone-call permission
    /// even though they are not the dialer
    pub fn requires_call_permission(&self) -> bool {
        matches!(
            self,
            ContactMethod::WhatsAppCall(_)
                | ContactMethod::WhatsAppVideoCall(_)
                | ContactMethod::SignalCall(_)
                | ContactMethod::SignalVideoCall(_)
        )
    }

    /// Third-party package that must be installed to launch this method
    pub fn package(&self) -> Option<&str> {
        match self {
            ContactMethod::WhatsAppMessage(_)
            | ContactMethod::WhatsAppCall(_)
            | ContactMethod::WhatsAppVideoCall(_) => Some(WHATSAPP_PACKAGE),
            ContactMethod::TelegramMessage(_)
            | ContactMethod::TelegramCall(_)
            | ContactMethod::TelegramVideoCall(_) => Some(TELEGRAM_PACKAGE),
            ContactMethod::SignalMessage(_)
            | ContactMethod::SignalCall(_)
            | ContactMethod::SignalVideoCall(_) => Some(SIGNAL_PACKAGE),
            ContactMethod::GoogleMeet(_) => Some(GOOGLE_MEET_PACKAGE),
            ContactMethod::CustomApp { package, .. } => Some(package.as_str()),
            _ => None,
        }
    }

    /// Provider mime type of the backing data row
    pub fn mime_type(&self) -> Option<&str> {
        let mime = match self {
            ContactMethod::Phone(_) | ContactMethod::Sms(_) => mime::PHONE,
            ContactMethod::Email(_) => mime::EMAIL,
            ContactMethod::WhatsAppMessage(_) => mime::WHATSAPP_MESSAGE,
            ContactMethod::WhatsAppCall(_) => mime::WHATSAPP_CALL,
            ContactMethod::WhatsAppVideoCall(_) => mime::WHATSAPP_VIDEO_CALL,
            ContactMethod::TelegramMessage(_) => mime::TELEGRAM_MESSAGE,
            ContactMethod::TelegramCall(_) => mime::TELEGRAM_CALL,
            ContactMethod::TelegramVideoCall(_) => mime::TELEGRAM_VIDEO_CALL,
            ContactMethod::SignalMessage(_) => mime::SIGNAL_MESSAGE,
            ContactMethod::SignalCall(_) => mime::SIGNAL_CALL,
            ContactMethod::SignalVideoCall(_) => mime::SIGNAL_VIDEO_CALL,
            ContactMethod::GoogleMeet(_) => mime::GOOGLE_MEET,
            ContactMethod::GenericVideoCall(_) => mime::VIDEO_CALL,
            ContactMethod::CustomApp { mime_type, .. } => mime_type.as_str(),
            ContactMethod::ViewInContactsApp(_) => return None,
        };
        Some(mime)
    }

    /// Short label for action lists
    pub fn label(&self) -> &str {
        match self {
            ContactMethod::Phone(_) => "Call",
            ContactMethod::Sms(_) => "Message",
            ContactMethod::Email(_) => "Email",
            ContactMethod::WhatsAppMessage(_) => "WhatsApp message",
            ContactMethod::WhatsAppCall(_) => "WhatsApp call",
            ContactMethod::WhatsAppVideoCall(_) => "WhatsApp video call",
            ContactMethod::TelegramMessage(_) => "Telegram message",
            ContactMethod::TelegramCall(_) => "Telegram call",
            ContactMethod::TelegramVideoCall(_) => "Telegram video call",
            ContactMethod::SignalMessage(_) => "Signal message",
            ContactMethod::SignalCall(_) => "Signal call",
            ContactMethod::SignalVideoCall(_) => "Signal video call",
            ContactMethod::GoogleMeet(_) => "Google Meet",
            ContactMethod::GenericVideoCall(_) => "Video call",
            ContactMethod::CustomApp { label, .. } => label.as_str(),
            ContactMethod::ViewInContactsApp(_) => "Open in Contacts",
        }
    }

    /// Classify a raw contacts-provider row by its mime type.
    ///
    /// Phone rows become [`ContactMethod::Phone`]; callers add the matching
    /// `Sms` method themselves. Unknown mime types yield None.
    pub fn from_provider_row(mime_type: &str, datum: &str, row_id: RowId) -> Option<Self> {
        let data = MethodData::new(datum.trim(), Some(row_id));
        let method = match mime_type {
            mime::PHONE => ContactMethod::Phone(data),
            mime::EMAIL => ContactMethod::Email(data),
            mime::WHATSAPP_MESSAGE => ContactMethod::WhatsAppMessage(data),
            mime::WHATSAPP_CALL => ContactMethod::WhatsAppCall(data),
            mime::WHATSAPP_VIDEO_CALL => ContactMethod::WhatsAppVideoCall(data),
            mime::TELEGRAM_MESSAGE => ContactMethod::TelegramMessage(data),
            mime::TELEGRAM_CALL => ContactMethod::TelegramCall(data),
            mime::TELEGRAM_VIDEO_CALL => ContactMethod::TelegramVideoCall(data),
            mime::SIGNAL_MESSAGE => ContactMethod::SignalMessage(data),
            mime::SIGNAL_CALL => ContactMethod::SignalCall(data),
            mime::SIGNAL_VIDEO_CALL => ContactMethod::SignalVideoCall(data),
            mime::GOOGLE_MEET => ContactMethod::GoogleMeet(data),
            mime::VIDEO_CALL => ContactMethod::GenericVideoCall(data),
            _ => return None,
        };
        Some(method)
    }
}
