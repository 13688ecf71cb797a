//! # Rejection Handlers
//!
//! Converts axum extractor rejections into [`AppError`] so malformed bodies and
//! query strings share the regular 400 response format.
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and forward the error with `?`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

use crate::AppError;

/// Turn a serde message such as "missing field `title` at line 1 column 2" into
/// "Missing required field: title".
fn friendly_json_message(error_message: String) -> String {
    if let Some(start) = error_message.find("missing field `") {
        let rest = &error_message[start + 15 ..];
        if let Some(end) = rest.find('`') {
            return format!("Missing required field: {}", &rest[.. end]);
        }
    }
    error_message
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => "Content-Type must be application/json".to_string(),
            JsonRejection::JsonSyntaxError(_) => "Invalid JSON".to_string(),
            _ => friendly_json_message(rejection.body_text()),
        };
        AppError::bad_request(message)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let msg = friendly_json_message(
            "Failed to deserialize the JSON body into the target type: missing field `title` at line 1 column 2"
                .to_string(),
        );
        assert_eq!(msg, "Missing required field: title");
    }

    #[test]
    fn test_other_messages_untouched() {
        let msg = friendly_json_message("invalid type: string, expected u32".to_string());
        assert_eq!(msg, "invalid type: string, expected u32");
    }
}
