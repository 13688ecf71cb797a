//! # Logging Configuration Tests
//!
//! Tests for structured logging setup and configuration.

#[cfg(test)]
mod logging_config_tests {
    use logging::LoggingConfig;

    #[test]
    fn test_from_env_uses_fallbacks() {
        // Other tests in this binary never set these variables
        let config = LoggingConfig::from_env("warn", "pretty", Some("logs/portal.log"));
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(config.level, "warn");
        }
        if std::env::var("PORTAL_LOG_FORMAT").is_err() {
            assert_eq!(config.format, "pretty");
        }
        if std::env::var("PORTAL_LOG_FILE").is_err() {
            assert_eq!(config.log_file.as_deref(), Some("logs/portal.log"));
        }
    }

    #[test]
    fn test_config_deserializes_kebab_case() {
        let config: LoggingConfig = serde_json::from_value(serde_json::json!({
            "level": "debug",
            "log-file": "/tmp/portal.log"
        }))
        .unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "compact");
        assert_eq!(config.log_file.as_deref(), Some("/tmp/portal.log"));
    }
}

#[cfg(test)]
mod request_id_tests {
    use logging::RequestId;

    #[test]
    fn test_request_id_uniqueness() {
        let ids: std::collections::HashSet<String> = (0 .. 100).map(|_| RequestId::new().to_string()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_generated_ids_round_trip_through_header() {
        let id = RequestId::new();
        let parsed = RequestId::try_from_header(id.as_str());
        assert_eq!(parsed, Some(id));
    }
}

#[cfg(test)]
mod macro_tests {
    #[test]
    fn test_macros_expand() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        logging::log_api_request!("POST", "/api/track", 200, 3, "k192v2g4w3zq8h6j5k12");
        logging::log_tracking_event!("sessionEnd", "s1");
        logging::log_tracking_event!("action", "s1", action_type = "RESOURCE_DOWNLOAD");
    }
}
