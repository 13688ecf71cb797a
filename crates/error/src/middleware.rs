//! # Error Responses
//!
//! Conversion of [`AppError`] into axum HTTP responses.
//!
//! ## Usage
//!
//! ```rust
//! use error::{AppError, ErrorHandler};
//!
//! let handler = ErrorHandler::new(false);
//! let response = handler.to_response(&AppError::not_found("Job not found"));
//! assert_eq!(response.status(), 404);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::AppError;

/// Generic message sent for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub success: bool,
    pub code:    &'a str,
    pub message: &'a str,
}

/// Error handler that converts errors to HTTP responses.
#[derive(Clone)]
pub struct ErrorHandler {
    /// Whether to expose the message of server errors.
    pub include_details: bool,
}

impl ErrorHandler {
    /// Create a new error handler.
    #[inline]
    pub fn new(include_details: bool) -> Self {
        Self {
            include_details,
        }
    }

    /// Convert an error to a response.
    ///
    /// Client errors always carry their message. Server errors are logged and
    /// replaced by a generic message unless `include_details` is set.
    pub fn to_response(&self, err: &AppError) -> Response {
        let status = err.status();
        let message = if status.is_server_error() {
            tracing::error!(code = err.code(), error = %err, "Request failed");
            if self.include_details {
                err.message()
            }
            else {
                INTERNAL_ERROR_MESSAGE
            }
        }
        else {
            tracing::debug!(code = err.code(), error = %err, "Request rejected");
            err.message()
        };

        let body = ErrorBody {
            success: false,
            code: err.code(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response { ErrorHandler::new(false).to_response(&self) }
}

/// Fallback for unmatched routes.
pub async fn not_found_fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            success: false,
            code:    "NOT_FOUND",
            message: "Route not found",
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_handler_status() {
        let handler = ErrorHandler::new(false);
        let response = handler.to_response(&AppError::not_found("Event not found"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_into_response_server_error() {
        let response = AppError::database("relation \"jobs\" does not exist").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let response = AppError::database("relation \"jobs\" does not exist").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "DATABASE_ERROR");
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response = AppError::bad_request("Job already bookmarked").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Job already bookmarked");
    }
}
