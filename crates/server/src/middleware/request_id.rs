//! Request id middleware.
//!
//! Reuses a well-formed incoming `x-request-id` or assigns a new one, runs the
//! request inside a span carrying the id, echoes it on the response and logs
//! the completed request.

use std::time::Instant;

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use logging::{RequestId, REQUEST_ID_HEADER};
use tracing::Instrument;

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_header_or_new(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
    );
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!("request", request_id = %request_id, method = %method, path = %path);
    let started = Instant::now();
    let mut response = next.run(request).instrument(span).await;

    logging::log_api_request!(
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis(),
        request_id
    );

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
