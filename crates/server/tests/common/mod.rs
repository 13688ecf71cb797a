//! # Common Test Utilities
//!
//! In-memory SQLite state with the migrations applied, row fixtures and a
//! helper that drives the router with `oneshot`.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Once,
};

use axum::{body::Body, http::Request, Router};
use chrono::{Duration, Utc};
use entity::{
    admins,
    employers,
    events,
    jobs,
    sea_orm_active_enums::{AdminRole, EventType, JobStatus},
    students,
    universities,
};
use http::{HeaderMap, StatusCode};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use serde_json::Value;
use server::AppState;
use tower::ServiceExt;

/// Initialize test logging (run once per test binary)
static INIT: Once = Once::new();

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub const TEST_PASSWORD: &str = "Secret123";

pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Unique suffix for emails and names within one test binary.
pub fn unique(prefix: &str) -> String { format!("{}{}", prefix, COUNTER.fetch_add(1, Ordering::Relaxed)) }

/// Fresh migrated database wrapped in an [`AppState`].
///
/// One pooled connection keeps the in-memory database alive for the whole
/// test.
pub async fn test_state() -> AppState {
    init_test_env();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    AppState::new(db, false)
}

pub async fn create_university(state: &AppState, name: &str) -> universities::Model {
    universities::ActiveModel {
        name: Set(name.to_string()),
        location: Set("Lagos".to_string()),
        is_partner: Set(true),
        is_visible: Set(true),
        display_order: Set(0),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .expect("Failed to insert university")
}

pub async fn create_student(state: &AppState, university_id: Option<String>) -> students::Model {
    let name = unique("student");
    students::ActiveModel {
        name: Set(name.clone()),
        email: Set(format!("{}@example.com", name)),
        password: Set(auth::hash_plain(TEST_PASSWORD).expect("Failed to hash password")),
        college: Set("City College".to_string()),
        degree: Set("BSc".to_string()),
        year: Set(2),
        interests: Set(serde_json::json!(["rust"])),
        is_verified: Set(false),
        university_id: Set(university_id),
        cv_path: Set(None),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .expect("Failed to insert student")
}

pub async fn create_employer(state: &AppState) -> employers::Model {
    let name = unique("employer");
    employers::ActiveModel {
        name: Set(name.clone()),
        email: Set(format!("{}@example.com", name)),
        password: Set(auth::hash_plain(TEST_PASSWORD).expect("Failed to hash password")),
        company: Set("Acme".to_string()),
        designation: Set("Recruiter".to_string()),
        is_verified: Set(true),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .expect("Failed to insert employer")
}

pub async fn create_admin(state: &AppState) -> admins::Model {
    let name = unique("admin");
    admins::ActiveModel {
        name: Set(name.clone()),
        email: Set(format!("{}@example.com", name)),
        password: Set(auth::hash_plain(TEST_PASSWORD).expect("Failed to hash password")),
        role: Set(AdminRole::Admin),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .expect("Failed to insert admin")
}

pub async fn create_job(state: &AppState, employer_id: &str, title: &str, status: JobStatus) -> jobs::Model {
    jobs::ActiveModel {
        title: Set(title.to_string()),
        description: Set("A long enough description of the role.".to_string()),
        job_type: Set("Internship".to_string()),
        location: Set("Remote".to_string()),
        stipend: Set("1000".to_string()),
        duration: Set("3 months".to_string()),
        apply_link: Set("https://example.com/apply".to_string()),
        is_remote: Set(true),
        is_paid: Set(true),
        is_short_term: Set(false),
        required_degree: Set(None),
        status: Set(status),
        employer_id: Set(employer_id.to_string()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .expect("Failed to insert job")
}

pub async fn create_event(state: &AppState, title: &str, days_from_now: i64, capacity: Option<i32>) -> events::Model {
    events::ActiveModel {
        title: Set(title.to_string()),
        description: Set("Event description".to_string()),
        date: Set(Utc::now() + Duration::days(days_from_now)),
        end_date: Set(None),
        location: Set("Online".to_string()),
        event_type: Set(EventType::Webinar),
        capacity: Set(capacity),
        is_virtual: Set(true),
        registration_link: Set(None),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .expect("Failed to insert event")
}

/// Send one request through a fresh router.
pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let app: Router = server::create_router(state.clone());
    let response = app.oneshot(request).await.expect("Router failed");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, headers, body)
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(http::header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(http::header::COOKIE, cookie);
    }
    builder
        .body(Body::empty())
        .expect("Failed to build request")
}
