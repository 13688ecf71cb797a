//! # Portal Logging Infrastructure
//!
//! Structured logging for the portal services.
//! Wraps `tracing-subscriber` with environment driven configuration and
//! provides request correlation ids.

pub mod config;
pub mod macros;
pub mod request_id;

pub use config::{LogGuard, LoggingConfig};
pub use request_id::{RequestId, REQUEST_ID_HEADER};
// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Error raised when the global subscriber cannot be installed.
pub type InitError = tracing::subscriber::SetGlobalDefaultError;

/// Initialize the logging system.
///
/// `level` and `format` are fallbacks for `RUST_LOG` and `PORTAL_LOG_FORMAT`.
/// The returned guard must be held for as long as file output is wanted.
pub fn init(level: &str, format: &str, log_file: Option<&str>) -> Result<LogGuard, InitError> {
    init_with_config(LoggingConfig::from_env(level, format, log_file))
}

/// Initialize logging with a custom configuration.
pub fn init_with_config(config: LoggingConfig) -> Result<LogGuard, InitError> {
    let (subscriber, guard) = config.build();
    tracing::subscriber::set_global_default(subscriber)?;
    info!(level = %config.level, format = %config.format, file = ?config.log_file, "Logging initialized");
    Ok(guard)
}
