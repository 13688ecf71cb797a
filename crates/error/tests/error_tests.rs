//! # Error Crate Tests
//!
//! Status mapping, response bodies and extractor rejections as seen from outside the crate.

#[cfg(test)]
mod into_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use error::AppError;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_taxonomy_statuses() {
        let cases = vec![
            (AppError::validation("Missing required field: path"), StatusCode::BAD_REQUEST),
            (AppError::bad_request("Invalid event type"), StatusCode::BAD_REQUEST),
            (AppError::unauthorized("Unauthorized"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("Job limit reached"), StatusCode::FORBIDDEN),
            (AppError::not_found("Event not found"), StatusCode::NOT_FOUND),
            (AppError::conflict("Email already registered"), StatusCode::CONFLICT),
            (AppError::internal("panic"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            let (status, json) = body_json(error).await;
            assert_eq!(status, expected);
            assert_eq!(json["success"], false);
            assert!(json["code"].is_string());
        }
    }

    #[tokio::test]
    async fn test_business_rule_message_is_visible() {
        let (status, json) = body_json(AppError::bad_request("Event has reached maximum capacity")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Event has reached maximum capacity");
    }

    #[tokio::test]
    async fn test_store_error_is_generic() {
        let (status, json) = body_json(sea_orm::DbErr::Custom("UNIQUE constraint failed".to_string()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "Internal server error");
    }
}

#[cfg(test)]
mod rejection_tests {
    use axum::{
        body::Body,
        extract::{rejection::JsonRejection, FromRequest},
        http::{header, Request},
        Json,
    };
    use error::AppError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Payload {
        title: String,
    }

    async fn extract(content_type: &str, body: &'static str) -> Result<Json<Payload>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        Json::<Payload>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err: AppError = extract("text/plain", "{}").await.unwrap_err().into();
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Content-Type must be application/json");
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let err: AppError = extract("application/json", "{not json").await.unwrap_err().into();
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Invalid JSON");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let err: AppError = extract("application/json", "{}").await.unwrap_err().into();
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Missing required field: title");
    }
}

#[cfg(test)]
mod page_tests {
    use error::{Page, PaginationMeta};

    #[test]
    fn test_page_serialization_shape() {
        let page = Page::new(vec!["a", "b"], PaginationMeta::new(1, 2, 5));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["pagination"]["hasNextPage"], true);
    }

    #[test]
    fn test_pagination_invariants_hold() {
        for total in 0 .. 40u64 {
            for size in 1 .. 8u64 {
                let pages = total.div_ceil(size).max(1);
                for page in 1 ..= pages {
                    let meta = PaginationMeta::new(page, size, total);
                    assert_eq!(meta.total_pages, total.div_ceil(size));
                    assert_eq!(meta.has_next_page, page < meta.total_pages);
                    assert_eq!(meta.has_previous_page, page > 1);
                }
            }
        }
    }
}
