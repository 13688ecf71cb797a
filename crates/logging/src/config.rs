//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Keeps the non-blocking file writer alive. Dropping it flushes and stops file output.
#[derive(Default)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

type BoxedSubscriber = Box<dyn tracing::Subscriber + Send + Sync>;

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `server=debug,sea_orm=warn`
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,

    /// Optional log file path, rotated hourly
    #[serde(default)]
    pub log_file: Option<String>,

    /// Environment (development, testing, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "compact".to_string() }

fn default_environment() -> String { "development".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:       default_level(),
            format:      default_format(),
            log_file:    None,
            environment: default_environment(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables, falling back to the given values.
    pub fn from_env(level: &str, format: &str, log_file: Option<&str>) -> Self {
        Self {
            level:       std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
            format:      std::env::var("PORTAL_LOG_FORMAT").unwrap_or_else(|_| format.to_string()),
            log_file:    std::env::var("PORTAL_LOG_FILE")
                .ok()
                .or(log_file.map(|s| s.to_string())),
            environment: std::env::var("PORTAL_ENV").unwrap_or_else(|_| default_environment()),
        }
    }

    /// The filter built from `level`; unparsable directives fall back to `info`.
    pub fn filter(&self) -> EnvFilter { EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info")) }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> (BoxedSubscriber, LogGuard) {
        let console: Box<dyn tracing_subscriber::Layer<Registry> + Send + Sync> = match self.format.as_str() {
            "json" => {
                fmt::layer()
                    .json()
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .boxed()
            },
            "pretty" => {
                fmt::layer()
                    .pretty()
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .boxed()
            },
            _ => {
                fmt::layer()
                    .compact()
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .boxed()
            },
        };

        let mut layers = vec![console];
        let mut guard = LogGuard::default();

        if let Some(ref log_file) = self.log_file {
            let path = Path::new(log_file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "portal.log".to_string());

            let appender = tracing_appender::rolling::hourly(directory, file_name);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            );
            guard._file = Some(worker);
        }

        let subscriber = Registry::default().with(layers).with(self.filter());
        (Box::new(subscriber), guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "compact");
        assert_eq!(config.environment, "development");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LoggingConfig {
            level: "server=notalevel".to_string(),
            ..Default::default()
        };
        assert_eq!(config.filter().to_string(), "info");
    }

    #[test]
    fn test_build_each_format() {
        for format in ["json", "pretty", "compact", "unknown"] {
            let config = LoggingConfig {
                level: "debug".to_string(),
                format: format.to_string(),
                ..Default::default()
            };
            let (_subscriber, _guard) = config.build();
        }
    }

    #[test]
    fn test_build_with_file() {
        let dir = std::env::temp_dir().join(format!("portal-log-{}", std::process::id()));
        let config = LoggingConfig {
            log_file: Some(dir.join("portal.log").to_string_lossy().into_owned()),
            ..Default::default()
        };
        let (_subscriber, guard) = config.build();
        assert!(guard._file.is_some());
    }
}
