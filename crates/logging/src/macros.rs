//! # Logging Macros
//!
//! Convenience macros for structured logging with consistent field names.

/// Log a completed API request with method, path, status and latency.
///
/// # Example
///
/// ```rust
/// logging::log_api_request!("GET", "/api/events", 200, 12, "k192v2g4w3zq8h6j5k12");
/// ```
#[macro_export]
macro_rules! log_api_request {
    ($method:expr, $path:expr, $status:expr, $duration:expr, $request_id:expr) => {
        $crate::info!(
            target: "api",
            method = %$method,
            path = %$path,
            status = %$status,
            duration_ms = %$duration,
            request_id = %$request_id,
            "API request"
        )
    };
}

/// Log a tracking pipeline event against a client session id.
///
/// # Example
///
/// ```rust
/// logging::log_tracking_event!("pageView", "s1", path = "/jobs");
/// ```
#[macro_export]
macro_rules! log_tracking_event {
    ($event:expr, $session:expr $(, $($fields:tt)*)?) => {
        $crate::debug!(
            target: "tracking",
            event_type = %$event,
            session_id = %$session,
            $($($fields)*,)?
            "Tracking event recorded"
        )
    };
}
