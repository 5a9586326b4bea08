use thiserror::Error;
use tracing::{error, warn};

use crate::actions::ActionFailure;
use crate::domains::Domain;

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational notice
    Warning,  // recoverable
    Error,    // operation failed
    Critical, // requires user action
}

/// Domain-specific errors for the search core
#[derive(Error, Debug)]
pub enum SearchKitError {
    #[error("Failed to persist preferences to '{path}': {source}")]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize stored data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Loading {domain} candidates failed: {message}")]
    CandidateLoad { domain: Domain, message: String },

    #[error("Action could not be resolved: {0}")]
    Action(#[from] ActionFailure),
}

impl SearchKitError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Persistence { .. } => ErrorSeverity::Error,
            Self::Serialization(_) => ErrorSeverity::Warning,
            Self::CandidateLoad { .. } => ErrorSeverity::Warning,
            Self::Action(failure) => match failure {
                ActionFailure::PermissionDenied => ErrorSeverity::Info,
                _ => ErrorSeverity::Warning,
            },
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence { .. } => "Could not save your preferences".to_string(),
            Self::Serialization(e) => format!("Stored data is invalid: {}", e),
            Self::CandidateLoad { domain, .. } => format!("Could not load {}", domain),
            Self::Action(failure) => failure.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchKitError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use search_kit_core::error::ResultExt;
///
/// // Keep the previous candidate list if a reload fails
/// let apps = source.load_candidates().log_err();
///
/// // Log as warning for expected failures
/// let ledger = read_recents().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Panic in debug mode, log error in release mode.
///
/// Use for "impossible" states that should crash during development
/// but gracefully degrade in production.
#[macro_export]
macro_rules! debug_panic {
    ( $($fmt_arg:tt)* ) => {
        if cfg!(debug_assertions) {
            panic!( $($fmt_arg)* );
        } else {
            tracing::error!("IMPOSSIBLE STATE: {}", format_args!($($fmt_arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_failure_converts_and_keeps_message() {
        let err: SearchKitError = ActionFailure::AppNotInstalled {
            package: "com.whatsapp".to_string(),
        }
        .into();
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.user_message().contains("com.whatsapp"));
    }

    #[test]
    fn test_permission_denied_is_informational() {
        let err = SearchKitError::Action(ActionFailure::PermissionDenied);
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_log_err_returns_none_on_error() {
        let result: std::result::Result<u32, &str> = Err("boom");
        assert_eq!(result.log_err(), None);
        let ok: std::result::Result<u32, &str> = Ok(3);
        assert_eq!(ok.warn_on_err(), Some(3));
    }
}
