use thiserror::Error;

/// Why an action has no launchable target.
///
/// These are surfaced to the UI as notices, never as crashes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionFailure {
    #[error("{package} is not installed")]
    AppNotInstalled { package: String },

    #[error("Contact has no method for this channel")]
    NoMatchingMethod,

    #[error("Contact method has no provider row to launch")]
    MissingProviderRow,

    #[error("Contact has no phone number")]
    NoPhoneNumber,

    #[error("Contact method has no value")]
    EmptyDatum,

    #[error("Permission was denied")]
    PermissionDenied,

    #[error("No action is waiting for a permission result")]
    NoPendingAction,

    #[error("Call flow cannot {attempted} at this step")]
    UnexpectedCallStep { attempted: &'static str },
}

impl ActionFailure {
    /// Stable identifier for UI copy lookup and logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            ActionFailure::AppNotInstalled { .. } => "app_not_installed",
            ActionFailure::NoMatchingMethod => "no_matching_method",
            ActionFailure::MissingProviderRow => "missing_provider_row",
            ActionFailure::NoPhoneNumber => "no_phone_number",
            ActionFailure::EmptyDatum => "empty_datum",
            ActionFailure::PermissionDenied => "permission_denied",
            ActionFailure::NoPendingAction => "no_pending_action",
            ActionFailure::UnexpectedCallStep { .. } => "unexpected_call_step",
        }
    }
}
