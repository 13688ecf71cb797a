//! # Portal API Server
//!
//! Axum-based HTTP API for the student and employer portal.
//!
//! ## Modules
//!
//! - [`api`]: Domain handlers (accounts, jobs, events, universities, ...)
//! - [`tracking`]: Session, page view and action ingestion
//! - [`analytics`]: Aggregation over the tracking tables for the admin area
//! - [`query`]: Generic list filtering and pagination
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: Identity gates and request ids
//! - [`router`]: Route table

pub mod analytics;
pub mod api;
pub mod dto;
pub mod middleware;
pub mod query;
pub mod router;
pub mod tracking;
pub mod utils;

pub use router::create_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:             sea_orm::DbConn,
    /// Whether identity cookies carry the `Secure` attribute
    pub secure_cookies: bool,
    /// Server start time for uptime calculation
    pub start_time:     std::time::Instant,
}

impl AppState {
    pub fn new(db: sea_orm::DbConn, secure_cookies: bool) -> Self {
        Self {
            db,
            secure_cookies,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Server initialization result
#[derive(Debug)]
pub struct ServerResult {
    /// The address the server is bound to
    pub address:    String,
    /// Server start timestamp for logging
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl ServerResult {
    #[must_use]
    pub fn new(address: &str) -> Self {
        Self {
            address:    address.to_string(),
            started_at: chrono::Utc::now(),
        }
    }
}
