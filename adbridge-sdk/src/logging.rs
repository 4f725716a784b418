//! Optional logging setup for host applications.
//!
//! The SDK only ever emits `tracing` events; installing a subscriber is the
//! host's choice. These helpers cover the common cases without forcing a
//! dependency on any particular subscriber configuration.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging mode for different host environments.
#[derive(Debug, Clone, Copy)]
pub enum LoggingMode {
    /// No subscriber installed; all events are dropped.
    Silent,
    /// Compact stderr output at `info` level.
    Development,
    /// Verbose output with source locations at `debug` level.
    Debug,
}

/// Logging configuration error.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global tracing subscriber for the given mode.
///
/// Call once, early, before constructing any SDK objects that might log.
///
/// # Environment Variables
///
/// - `ADBRIDGE_LOG_LEVEL`: override the level filter (error, warn, info,
///   debug, trace), taking precedence over `RUST_LOG`
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let subscriber = Registry::default()
                .with(fmt::layer().with_target(false).compact())
                .with(env_filter("info"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let subscriber = Registry::default()
                .with(fmt::layer().pretty().with_file(true).with_line_number(true))
                .with(env_filter("debug"));

            subscriber
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Install a subscriber based on `ADBRIDGE_LOG_MODE`.
///
/// Recognized values are `"development"` and `"debug"`; anything else
/// (including unset) selects [`LoggingMode::Silent`].
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var("ADBRIDGE_LOG_MODE").as_deref() {
        Ok("development") => LoggingMode::Development,
        Ok("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    };

    init_logging(mode)
}

fn env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("ADBRIDGE_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}
