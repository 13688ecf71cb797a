//! # API Router Configuration
//!
//! Route table of the portal. Routes are grouped by the identity they need;
//! each group carries its gate as a route layer. The wrapper handlers below
//! only extract request parts and call the domain handlers in [`crate::api`],
//! [`crate::tracking`] and [`crate::analytics`].

use std::{collections::HashMap, net::SocketAddr};

use auth::{IdentityCookies, Role};
use axum::{
    extract::{
        connect_info::ConnectInfo,
        rejection::{JsonRejection, QueryRejection},
        Extension,
        Path,
        Query,
        State as AxumState,
    },
    http::{HeaderMap, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
    Json,
    Router,
};
use entity::{admins, bookmarked_jobs, events, jobs, resources, students, universities};
use error::{MessageResponse, Page, Result};
use http::Extensions;

use crate::{
    analytics,
    api,
    dto::{
        accounts::{AccountResponse, AdminSignupRequest, EmployerSignupRequest, LoginRequest, StudentSignupRequest},
        analytics::{AnalyticsQuery, AnalyticsReport},
        events::{CreateEventRequest, EventDetail, EventListResponse, EventWithCount, RegistrationListResponse, RegistrationResponse, UpdateEventRequest},
        jobs::{CreateJobRequest, JobDetail, JobWithEmployer, UpdateJobRequest},
        resources::{CreateResourceRequest, ResourceListResponse, UpdateResourceRequest},
        students::{AdminStats, BookmarkItem, BookmarkStatus, EmployerWithCount, StudentProfile, StudentWithUniversity, UpdateStudentRequest},
        tracking::{TrackRequest, TrackResponse, TrackingSummary},
        universities::{CreateUniversityRequest, ReorderRequest, UniversityWithCount, UpdateUniversityRequest},
        IdRequest,
    },
    middleware::{request_id_middleware, require_admin, require_employer, require_student, AuthenticatedAdmin, AuthenticatedEmployer, AuthenticatedStudent},
    query::ListParams,
    tracking,
    AppState,
};

type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;
type Created<T> = Result<(StatusCode, Json<T>)>;

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing the DB pool and cookie settings
///
/// # Returns
///
/// Configured Axum router with all routes, the 404 fallback and the request
/// id layer
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/api/track", post(track_handler))
        .route("/api/auth/signup", post(student_signup_handler))
        .route("/api/auth/login", post(student_login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/employers/signup", post(employer_signup_handler))
        .route("/api/employers/login", post(employer_login_handler))
        .route("/api/admin/signup", post(admin_signup_handler))
        .route("/api/admin/login", post(admin_login_handler))
        .route("/api/public/jobs", get(public_jobs_handler))
        .route("/api/universities", get(public_universities_handler))
        .route("/api/events", get(public_events_handler))
        .route("/api/events/{id}", get(event_handler))
        .route("/api/resources", get(public_resources_handler));

    let student_routes = Router::new()
        .route("/api/students/profile", get(student_profile_handler))
        .route("/api/students/bookmarks", get(list_bookmarks_handler).post(add_bookmark_handler))
        .route(
            "/api/students/bookmarks/{id}",
            get(bookmark_status_handler).delete(remove_bookmark_handler),
        )
        .route("/api/jobs/{id}", get(student_job_handler))
        .route("/api/events/register", post(register_handler))
        .route("/api/resources/{id}", get(student_resource_handler))
        .route_layer(middleware::from_fn(require_student));

    let employer_routes = Router::new()
        .route("/api/jobs", get(employer_jobs_handler).post(create_job_handler))
        .route_layer(middleware::from_fn(require_employer));

    let admin_routes = Router::new()
        .route("/api/track", get(tracking_summary_handler))
        .route("/api/admin/analytics", get(analytics_handler))
        .route("/api/admin/profile", get(admin_profile_handler))
        .route("/api/admin/stats", get(admin_stats_handler))
        .route("/api/admin/jobs", get(admin_jobs_handler))
        .route(
            "/api/admin/jobs/{id}",
            get(admin_job_handler)
                .patch(update_job_handler)
                .delete(delete_job_handler),
        )
        .route("/api/admin/students", get(list_students_handler))
        .route(
            "/api/admin/students/{id}",
            get(get_student_handler)
                .patch(update_student_handler)
                .delete(delete_student_handler),
        )
        .route("/api/admin/employers", get(list_employers_handler))
        .route("/api/admin/employers/{id}", get(get_employer_handler))
        .route(
            "/api/admin/universities",
            get(admin_universities_handler).post(create_university_handler),
        )
        .route("/api/admin/universities/reorder", post(reorder_universities_handler))
        .route(
            "/api/admin/universities/{id}",
            get(get_university_handler)
                .patch(update_university_handler)
                .delete(delete_university_handler),
        )
        .route("/api/admin/events", get(admin_events_handler).post(create_event_handler))
        .route(
            "/api/admin/events/{id}",
            get(admin_event_handler)
                .patch(update_event_handler)
                .delete(delete_event_handler),
        )
        .route(
            "/api/admin/events/{id}/registrations",
            get(registrations_handler).post(add_registration_handler),
        )
        .route(
            "/api/admin/events/{id}/registrations/{registration_id}",
            axum::routing::delete(remove_registration_handler),
        )
        .route(
            "/api/admin/resources",
            get(admin_resources_handler).post(create_resource_handler),
        )
        .route(
            "/api/admin/resources/{id}",
            get(admin_resource_handler)
                .patch(update_resource_handler)
                .delete(delete_resource_handler),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public_routes
        .merge(student_routes)
        .merge(employer_routes)
        .merge(admin_routes)
        .fallback(error::middleware::not_found_fallback)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn peer_addr(extensions: &Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

async fn health_handler() -> &'static str { "OK" }

/// Wrapper handler for the tracking beacon
async fn track_handler(
    AxumState(state): AxumState<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    body: JsonBody<TrackRequest>,
) -> Result<Json<TrackResponse>> {
    tracking::track_handler(&state, &headers, peer_addr(&extensions), body).await
}

async fn tracking_summary_handler(AxumState(state): AxumState<AppState>) -> Result<Json<TrackingSummary>> {
    tracking::tracking_summary_handler(&state).await
}

async fn analytics_handler(
    AxumState(state): AxumState<AppState>,
    query: std::result::Result<Query<AnalyticsQuery>, QueryRejection>,
) -> Result<Json<AnalyticsReport>> {
    let Query(query) = query?;
    analytics::analytics_handler(&state, query).await
}

// Accounts

async fn student_signup_handler(AxumState(state): AxumState<AppState>, body: JsonBody<StudentSignupRequest>) -> Created<AccountResponse> {
    let Json(req) = body?;
    api::accounts::student_signup_handler(&state, req).await
}

async fn student_login_handler(AxumState(state): AxumState<AppState>, body: JsonBody<LoginRequest>) -> Result<Response> {
    let Json(req) = body?;
    api::accounts::student_login_handler(&state, req).await
}

async fn employer_signup_handler(AxumState(state): AxumState<AppState>, body: JsonBody<EmployerSignupRequest>) -> Created<AccountResponse> {
    let Json(req) = body?;
    api::accounts::employer_signup_handler(&state, req).await
}

async fn employer_login_handler(AxumState(state): AxumState<AppState>, body: JsonBody<LoginRequest>) -> Result<Response> {
    let Json(req) = body?;
    api::accounts::employer_login_handler(&state, req).await
}

async fn admin_signup_handler(AxumState(state): AxumState<AppState>, body: JsonBody<AdminSignupRequest>) -> Created<AccountResponse> {
    let Json(req) = body?;
    api::accounts::admin_signup_handler(&state, req).await
}

async fn admin_login_handler(AxumState(state): AxumState<AppState>, body: JsonBody<LoginRequest>) -> Result<Response> {
    let Json(req) = body?;
    api::accounts::admin_login_handler(&state, req).await
}

async fn logout_handler(AxumState(state): AxumState<AppState>) -> Response { api::accounts::logout_handler(&state) }

async fn admin_profile_handler(AxumState(state): AxumState<AppState>, Extension(admin): Extension<AuthenticatedAdmin>) -> Result<Json<admins::Model>> {
    api::accounts::admin_profile_handler(&state, &admin.id).await
}

async fn student_profile_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
) -> Result<Json<StudentProfile>> {
    api::accounts::student_profile_handler(&state, &student.id).await
}

async fn admin_stats_handler(AxumState(state): AxumState<AppState>) -> Result<Json<AdminStats>> { api::stats::admin_stats_handler(&state).await }

// Jobs

async fn create_job_handler(
    AxumState(state): AxumState<AppState>,
    Extension(employer): Extension<AuthenticatedEmployer>,
    body: JsonBody<CreateJobRequest>,
) -> Created<jobs::Model> {
    let Json(req) = body?;
    api::jobs::create_job_handler(&state, &employer.id, req).await
}

async fn employer_jobs_handler(
    AxumState(state): AxumState<AppState>,
    Extension(employer): Extension<AuthenticatedEmployer>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<jobs::Model>>> {
    api::jobs::employer_jobs_handler(&state, &employer.id, ListParams::new(params)).await
}

async fn student_job_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
    Path(id): Path<String>,
) -> Result<Json<JobDetail>> {
    api::jobs::student_job_handler(&state, &student.id, &id).await
}

async fn public_jobs_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<JobWithEmployer>>> {
    api::jobs::public_jobs_handler(&state, ListParams::new(params)).await
}

async fn admin_jobs_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<JobWithEmployer>>> {
    api::jobs::admin_jobs_handler(&state, ListParams::new(params)).await
}

async fn admin_job_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<JobWithEmployer>> {
    api::jobs::admin_job_handler(&state, &id).await
}

async fn update_job_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    body: JsonBody<UpdateJobRequest>,
) -> Result<Json<jobs::Model>> {
    let Json(req) = body?;
    api::jobs::update_job_handler(&state, &id, req).await
}

async fn delete_job_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<MessageResponse>> {
    api::jobs::delete_job_handler(&state, &id).await
}

// Students and employers

async fn list_students_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<StudentWithUniversity>>> {
    api::students::list_students_handler(&state, ListParams::new(params)).await
}

async fn get_student_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<StudentWithUniversity>> {
    api::students::get_student_handler(&state, &id).await
}

async fn update_student_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    body: JsonBody<UpdateStudentRequest>,
) -> Result<Json<students::Model>> {
    let Json(req) = body?;
    api::students::update_student_handler(&state, &id, req).await
}

async fn delete_student_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<MessageResponse>> {
    api::students::delete_student_handler(&state, &id).await
}

async fn list_employers_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<EmployerWithCount>>> {
    api::employers::list_employers_handler(&state, ListParams::new(params)).await
}

async fn get_employer_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<EmployerWithCount>> {
    api::employers::get_employer_handler(&state, &id).await
}

// Universities

async fn public_universities_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<universities::Model>>> {
    api::universities::public_universities_handler(&state, ListParams::new(params)).await
}

async fn admin_universities_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<UniversityWithCount>>> {
    api::universities::admin_universities_handler(&state, ListParams::new(params)).await
}

async fn create_university_handler(AxumState(state): AxumState<AppState>, body: JsonBody<CreateUniversityRequest>) -> Created<universities::Model> {
    let Json(req) = body?;
    api::universities::create_university_handler(&state, req).await
}

async fn get_university_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<UniversityWithCount>> {
    api::universities::get_university_handler(&state, &id).await
}

async fn update_university_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    body: JsonBody<UpdateUniversityRequest>,
) -> Result<Json<universities::Model>> {
    let Json(req) = body?;
    api::universities::update_university_handler(&state, &id, req).await
}

async fn delete_university_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<MessageResponse>> {
    api::universities::delete_university_handler(&state, &id).await
}

async fn reorder_universities_handler(AxumState(state): AxumState<AppState>, body: JsonBody<ReorderRequest>) -> Result<Json<MessageResponse>> {
    let Json(req) = body?;
    api::universities::reorder_universities_handler(&state, req).await
}

// Events

async fn public_events_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<EventListResponse>> {
    api::events::public_events_handler(&state, ListParams::new(params)).await
}

/// Event detail; a `studentId` cookie, when present, fills `isRegistered`.
async fn event_handler(AxumState(state): AxumState<AppState>, headers: HeaderMap, Path(id): Path<String>) -> Result<Json<EventDetail>> {
    let cookies = IdentityCookies::from_headers(&headers);
    api::events::get_event_handler(&state, &id, cookies.get(Role::Student)).await
}

async fn register_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
    body: JsonBody<IdRequest>,
) -> Created<RegistrationResponse> {
    let Json(req) = body?;
    api::events::register_handler(&state, &student.id, req.event_id).await
}

async fn admin_events_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<EventListResponse>> {
    api::events::admin_events_handler(&state, ListParams::new(params)).await
}

async fn create_event_handler(AxumState(state): AxumState<AppState>, body: JsonBody<CreateEventRequest>) -> Created<events::Model> {
    let Json(req) = body?;
    api::events::create_event_handler(&state, req).await
}

async fn admin_event_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<EventWithCount>> {
    api::events::admin_event_handler(&state, &id).await
}

async fn update_event_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    body: JsonBody<UpdateEventRequest>,
) -> Result<Json<events::Model>> {
    let Json(req) = body?;
    api::events::update_event_handler(&state, &id, req).await
}

async fn delete_event_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<MessageResponse>> {
    api::events::delete_event_handler(&state, &id).await
}

async fn registrations_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<RegistrationListResponse>> {
    api::events::registrations_handler(&state, &id, ListParams::new(params)).await
}

async fn add_registration_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    body: JsonBody<IdRequest>,
) -> Created<RegistrationResponse> {
    let Json(req) = body?;
    api::events::add_registration_handler(&state, &id, req.student_id).await
}

async fn remove_registration_handler(
    AxumState(state): AxumState<AppState>,
    Path((id, registration_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    api::events::remove_registration_handler(&state, &id, &registration_id).await
}

// Resources

async fn public_resources_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ResourceListResponse>> {
    api::resources::public_resources_handler(&state, ListParams::new(params)).await
}

async fn student_resource_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<resources::Model>> {
    api::resources::get_resource_handler(&state, &id).await
}

async fn admin_resources_handler(
    AxumState(state): AxumState<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ResourceListResponse>> {
    api::resources::admin_resources_handler(&state, ListParams::new(params)).await
}

async fn create_resource_handler(AxumState(state): AxumState<AppState>, body: JsonBody<CreateResourceRequest>) -> Created<resources::Model> {
    let Json(req) = body?;
    api::resources::create_resource_handler(&state, req).await
}

async fn admin_resource_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<resources::Model>> {
    api::resources::get_resource_handler(&state, &id).await
}

async fn update_resource_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<String>,
    body: JsonBody<UpdateResourceRequest>,
) -> Result<Json<resources::Model>> {
    let Json(req) = body?;
    api::resources::update_resource_handler(&state, &id, req).await
}

async fn delete_resource_handler(AxumState(state): AxumState<AppState>, Path(id): Path<String>) -> Result<Json<MessageResponse>> {
    api::resources::delete_resource_handler(&state, &id).await
}

// Bookmarks

async fn list_bookmarks_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<BookmarkItem>>> {
    api::bookmarks::list_bookmarks_handler(&state, &student.id, ListParams::new(params)).await
}

async fn add_bookmark_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
    body: JsonBody<IdRequest>,
) -> Created<bookmarked_jobs::Model> {
    let Json(req) = body?;
    api::bookmarks::add_bookmark_handler(&state, &student.id, req.job_id).await
}

async fn bookmark_status_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
    Path(job_id): Path<String>,
) -> Result<Json<BookmarkStatus>> {
    api::bookmarks::bookmark_status_handler(&state, &student.id, &job_id).await
}

async fn remove_bookmark_handler(
    AxumState(state): AxumState<AppState>,
    Extension(student): Extension<AuthenticatedStudent>,
    Path(job_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    api::bookmarks::remove_bookmark_handler(&state, &student.id, &job_id).await
}
