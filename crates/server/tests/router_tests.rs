//! HTTP level behaviour of the router: gates, cookies, error bodies and
//! request ids.

mod common;

use common::{create_admin, create_employer, create_student, get_request, json_request, send, test_state, TEST_PASSWORD};
use http::{header, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let state = test_state().await;
    let (status, _, body) = send(&state, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let state = test_state().await;
    let (status, _, body) = send(&state, get_request("/api/nothing-here", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_gates_reject_missing_cookies() {
    let state = test_state().await;

    for uri in [
        "/api/admin/stats",
        "/api/admin/analytics",
        "/api/track",
        "/api/students/profile",
        "/api/students/bookmarks",
        "/api/jobs",
    ] {
        let (status, _, body) = send(&state, get_request(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} was not gated");
        assert_eq!(body["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn test_admin_gate_requires_stored_admin() {
    let state = test_state().await;

    let (status, ..) = send(&state, get_request("/api/admin/stats", Some("adminId=forged"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = create_admin(&state).await;
    let cookie = format!("adminId={}", admin.id);
    let (status, _, body) = send(&state, get_request("/api/admin/stats", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["studentCount"], 0);
    assert_eq!(body["resourceCount"], 0);
}

#[tokio::test]
async fn test_analytics_endpoint() {
    let state = test_state().await;
    let admin = create_admin(&state).await;
    let cookie = format!("adminId={}", admin.id);

    let (status, _, body) = send(&state, get_request("/api/admin/analytics?period=week", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSessions"], 0);
    assert_eq!(body["averageSessionDuration"], 0.0);

    let (status, ..) = send(
        &state,
        get_request("/api/admin/analytics?period=custom&startDate=2025-02-01", Some(&cookie)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_signup_login_and_profile() {
    let state = test_state().await;

    let (status, _, body) = send(
        &state,
        json_request(
            "POST",
            "/api/auth/signup",
            None,
            json!({
                "name": "Ada Obi",
                "email": "  Ada@Example.com ",
                "password": TEST_PASSWORD,
                "college": "City College",
                "degree": "BSc",
                "year": 3,
                "interests": ["backend"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student"]["email"], "ada@example.com");

    let (status, ..) = send(
        &state,
        json_request(
            "POST",
            "/api/auth/signup",
            None,
            json!({
                "name": "Ada Again",
                "email": "ada@example.com",
                "password": TEST_PASSWORD,
                "college": "City College",
                "degree": "BSc",
                "year": 3,
                "interests": ["backend"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, ..) = send(
        &state,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "ada@example.com", "password": "Wrong1234"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, headers, _) = send(
        &state,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": " ADA@example.com", "password": TEST_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("studentId="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(!set_cookie.contains("Secure"));

    let cookie = set_cookie.split(';').next().unwrap();
    let (status, _, body) = send(&state, get_request("/api/students/profile", Some(cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada Obi");
    assert!(body.get("password").is_none());
    assert_eq!(body["registrations"], json!([]));
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let state = test_state().await;

    let (status, _, body) = send(
        &state,
        json_request(
            "POST",
            "/api/employers/signup",
            None,
            json!({
                "name": "Bo",
                "email": "bo@example.com",
                "password": "weak",
                "company": "Acme",
                "designation": "CTO"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _, body) = send(
        &state,
        json_request("POST", "/api/employers/signup", None, json!({"name": "Bo"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Missing required field"));
}

#[tokio::test]
async fn test_employer_posts_job_over_http() {
    let state = test_state().await;
    let employer = create_employer(&state).await;
    let cookie = format!("employerId={}", employer.id);

    let (status, _, body) = send(
        &state,
        json_request(
            "POST",
            "/api/jobs",
            Some(&cookie),
            json!({
                "title": "Data intern",
                "description": "Help the analytics team with reporting.",
                "type": "Internship",
                "location": "Abuja",
                "stipend": "300",
                "duration": "3 months",
                "applyLink": "https://example.com/jobs/1"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["isPaid"], true);
    assert_eq!(body["type"], "Internship");

    let (status, _, body) = send(&state, get_request("/api/jobs?status=PENDING", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["totalCount"], 1);
    assert_eq!(body["items"][0]["title"], "Data intern");
}

#[tokio::test]
async fn test_student_cookie_does_not_open_admin_routes() {
    let state = test_state().await;
    let student = create_student(&state, None).await;
    let cookie = format!("studentId={}", student.id);

    let (status, ..) = send(&state, get_request("/api/admin/students", Some(&cookie))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_every_cookie() {
    let state = test_state().await;
    let (status, headers, _) = send(&state, json_request("POST", "/api/auth/logout", None, json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let cleared: Vec<_> = headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cleared.len(), 3);
    assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let state = test_state().await;

    let (_, headers, _) = send(&state, get_request("/health", None)).await;
    let generated = headers.get("x-request-id").unwrap().to_str().unwrap();
    assert!(!generated.is_empty());

    let incoming = "req_0123456789abcdefghij";
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", incoming)
        .body(axum::body::Body::empty())
        .unwrap();
    let (_, headers, _) = send(&state, request).await;
    assert_eq!(headers.get("x-request-id").unwrap(), incoming);
}
