//! # CLI Validate Command
//!
//! Checks that the environment describes a usable database and listener
//! without connecting to anything.

use error::{AppError, Result};
use tracing::info;

use crate::config::{parse_socket_addr, DatabaseConfig};

/// Variables needed when `DATABASE_URL` is not given.
pub const REQUIRED_DB_VARS: [&str; 4] = ["PORTAL_DB_HOST", "PORTAL_DB_NAME", "PORTAL_DB_USER", "PORTAL_DB_PASSWORD"];

/// Names of the required variables that `lookup` cannot find.
fn missing_vars(lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
    REQUIRED_DB_VARS
        .iter()
        .copied()
        .filter(|var| lookup(var).is_none())
        .collect()
}

pub fn validate(database_url: Option<&str>) -> Result<()> {
    info!(target: "validate", "Validating configuration...");

    if database_url.is_none() {
        let missing = missing_vars(|var| std::env::var(var).ok());
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "DATABASE_URL is not set and these variables are missing: {}",
                missing.join(", ")
            )));
        }
        DatabaseConfig::from_env().map_err(|e| AppError::config(e.to_string()))?;
    }

    let host = std::env::var("PORTAL_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = std::env::var("PORTAL_PORT").unwrap_or_else(|_| "3000".to_owned());
    let port = port
        .parse::<u16>()
        .map_err(|_| AppError::config(format!("Invalid PORTAL_PORT: {}", port)))?;
    parse_socket_addr(&host, port).map_err(|e| AppError::config(format!("Invalid PORTAL_HOST {}: {}", host, e)))?;

    if std::env::var("PORTAL_SEED_ADMIN_PASSWORD").is_err() {
        tracing::warn!(target: "validate", "PORTAL_SEED_ADMIN_PASSWORD is not set; the super admin seed will be skipped");
    }

    info!(target: "validate", "Configuration is valid");
    Ok(())
}
