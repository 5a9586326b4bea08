//! Channel apps a logical action (message / call) can be routed through

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const WHATSAPP_PACKAGE: &str = "com.whatsapp";
pub const TELEGRAM_PACKAGE: &str = "org.telegram.messenger";
pub const SIGNAL_PACKAGE: &str = "org.thoughtcrime.securesms";
pub const GOOGLE_MEET_PACKAGE: &str = "com.google.android.apps.tachyon";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagingApp {
    /// The system SMS app; always available
    #[default]
    Messages,
    WhatsApp,
    Telegram,
    Signal,
}

impl MessagingApp {
    pub const ALL: [MessagingApp; 4] = [
        MessagingApp::Messages,
        MessagingApp::WhatsApp,
        MessagingApp::Telegram,
        MessagingApp::Signal,
    ];

    /// Package to check for installation; None for the universal channel
    pub fn package_name(&self) -> Option<&'static str> {
        match self {
            MessagingApp::Messages => None,
            MessagingApp::WhatsApp => Some(WHATSAPP_PACKAGE),
            MessagingApp::Telegram => Some(TELEGRAM_PACKAGE),
            MessagingApp::Signal => Some(SIGNAL_PACKAGE),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MessagingApp::Messages => "Messages",
            MessagingApp::WhatsApp => "WhatsApp",
            MessagingApp::Telegram => "Telegram",
            MessagingApp::Signal => "Signal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallingApp {
    /// The system phone app; always available
    #[default]
    Call,
    WhatsApp,
    Telegram,
    Signal,
    GoogleMeet,
}

impl CallingApp {
    pub const ALL: [CallingApp; 5] = [
        CallingApp::Call,
        CallingApp::WhatsApp,
        CallingApp::Telegram,
        CallingApp::Signal,
        CallingApp::GoogleMeet,
    ];

    pub fn package_name(&self) -> Option<&'static str> {
        match self {
            CallingApp::Call => None,
            CallingApp::WhatsApp => Some(WHATSAPP_PACKAGE),
            CallingApp::Telegram => Some(TELEGRAM_PACKAGE),
            CallingApp::Signal => Some(SIGNAL_PACKAGE),
            CallingApp::GoogleMeet => Some(GOOGLE_MEET_PACKAGE),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallingApp::Call => "Phone",
            CallingApp::WhatsApp => "WhatsApp",
            CallingApp::Telegram => "Telegram",
            CallingApp::Signal => "Signal",
            CallingApp::GoogleMeet => "Google Meet",
        }
    }

    /// Whether the app exposes separate voice and video methods.
    ///
    /// Google Meet has a single method that serves both.
    pub fn has_separate_video(&self) -> bool {
        !matches!(self, CallingApp::GoogleMeet)
    }
}

impl fmt::Display for MessagingApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for CallingApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

impl FromStr for MessagingApp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        match wanted.as_str() {
            "sms" => Ok(MessagingApp::Messages),
            _ => MessagingApp::ALL
                .into_iter()
                .find(|app| squash(app.label()) == wanted)
                .ok_or_else(|| format!("unknown messaging app '{}'", s)),
        }
    }
}

impl FromStr for CallingApp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        match wanted.as_str() {
            "call" | "dialer" => Ok(CallingApp::Call),
            _ => CallingApp::ALL
                .into_iter()
                .find(|app| squash(app.label()) == wanted)
                .ok_or_else(|| format!("unknown calling app '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universal_channels_have_no_package() {
        assert_eq!(MessagingApp::Messages.package_name(), None);
        assert_eq!(CallingApp::Call.package_name(), None);
        assert_eq!(MessagingApp::default(), MessagingApp::Messages);
        assert_eq!(CallingApp::default(), CallingApp::Call);
    }

    #[test]
    fn test_parse_from_labels() {
        assert_eq!("WhatsApp".parse::<MessagingApp>(), Ok(MessagingApp::WhatsApp));
        assert_eq!("sms".parse::<MessagingApp>(), Ok(MessagingApp::Messages));
        assert_eq!("google-meet".parse::<CallingApp>(), Ok(CallingApp::GoogleMeet));
        assert_eq!("phone".parse::<CallingApp>(), Ok(CallingApp::Call));
        assert!("carrier pigeon".parse::<CallingApp>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&CallingApp::GoogleMeet).unwrap(),
            "\"googlemeet\""
        );
        let app: MessagingApp = serde_json::from_str("\"whatsapp\"").unwrap();
        assert_eq!(app, MessagingApp::WhatsApp);
    }
}
