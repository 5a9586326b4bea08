//! Structured JSONL logging plus human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (~/.searchkit/logs/search-kit.jsonl) - structured for tooling
//! - **Compact to stderr** - human-readable for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use search_kit_core::{config, logging};
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init(&config::load_config().logging);
//!
//! tracing::info!(domain = "apps", result_count = 3, "Search complete");
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "search-kit.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// If the log file cannot be opened only the stderr layer is installed.
/// Calling this twice is harmless; the second subscriber is not installed.
pub fn init(config: &LoggingConfig) -> LoggingGuard {
    let log_dir = log_dir(config);
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    // Environment filter - RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let file = OpenOptions::new().create(true).append(true).open(&log_path);

    match file {
        Ok(file) => {
            // Non-blocking writer keeps ranking off the I/O path
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file);

            let json_layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);

            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(json_layer)
                .with(stderr_layer())
                .try_init()
                .is_ok();

            if installed {
                tracing::info!(
                    event_type = "app_lifecycle",
                    action = "started",
                    log_path = %log_path.display(),
                    "Logging initialized"
                );
            }

            LoggingGuard {
                _file_guard: Some(file_guard),
            }
        }
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            let _ = tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer())
                .try_init();
            LoggingGuard { _file_guard: None }
        }
    }
}

/// Compact layer for stderr (human developers)
fn stderr_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact()
}

/// Log directory: configured directory or ~/.searchkit/logs/
fn log_dir(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.directory {
        return PathBuf::from(shellexpand::tilde(dir).as_ref());
    }
    dirs::home_dir()
        .map(|h| h.join(".searchkit").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("search-kit-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path(config: &LoggingConfig) -> PathBuf {
    log_dir(config).join(LOG_FILE_NAME)
}
