//! # Account Handlers
//!
//! Signup, login and logout for students, employers and admins, plus the
//! two profile endpoints. Login answers with the role's identity cookie.

use auth::{hash_plain, password_matches, validate_password_strength, Role};
use axum::{
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use entity::{
    admins,
    employers,
    event_registrations,
    students,
    Admins,
    Employers,
    EventRegistrations,
    Events,
    Students,
    Universities,
};
use error::{AppError, MessageResponse, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::{normalize_email, validate};
use crate::{
    dto::{
        accounts::{AccountResponse, AdminSignupRequest, AdminSummary, EmployerSignupRequest, LoginRequest, StudentSignupRequest},
        students::{RegistrationWithEvent, StudentProfile},
        universities::UniversitySummary,
        AccountSummary,
    },
    AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Apply the password policy, reporting every broken rule at once.
pub fn check_password(password: &str) -> Result<()> {
    validate_password_strength(password).map_err(|errors| {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        AppError::validation(message)
    })
}

fn login_response(role: Role, id: &str, secure: bool, body: AccountResponse) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, role.set_cookie(id, secure))]),
        Json(body),
    )
        .into_response()
}

/// `POST /api/auth/signup`
pub async fn student_signup_handler(state: &AppState, mut req: StudentSignupRequest) -> Result<(StatusCode, Json<AccountResponse>)> {
    req.email = normalize_email(&req.email);
    validate(&req)?;
    check_password(&req.password)?;

    let email = req.email.clone();
    let existing = Students::find()
        .filter(students::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    if let Some(university_id) = &req.university_id {
        Universities::find_by_id(university_id.as_str())
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("University not found"))?;
    }

    let student = students::ActiveModel {
        name: Set(req.name.trim().to_string()),
        email: Set(email),
        password: Set(hash_plain(&req.password)?),
        college: Set(req.college),
        degree: Set(req.degree),
        year: Set(req.year),
        interests: Set(serde_json::json!(req.interests)),
        is_verified: Set(false),
        university_id: Set(req.university_id),
        cv_path: Set(None),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(student_id = %student.id, "Student registered");

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::student(
            "Student registered successfully",
            AccountSummary {
                id:    student.id,
                name:  student.name,
                email: student.email,
            },
        )),
    ))
}

/// `POST /api/auth/login`
pub async fn student_login_handler(state: &AppState, mut req: LoginRequest) -> Result<Response> {
    req.email = normalize_email(&req.email);
    validate(&req)?;

    let student = Students::find()
        .filter(students::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?
        .filter(|s| password_matches(&req.password, &s.password))
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    info!(student_id = %student.id, "Student logged in");

    Ok(login_response(
        Role::Student,
        &student.id,
        state.secure_cookies,
        AccountResponse::student(
            "Login successful",
            AccountSummary {
                id:    student.id.clone(),
                name:  student.name,
                email: student.email,
            },
        ),
    ))
}

/// `POST /api/employers/signup`
pub async fn employer_signup_handler(state: &AppState, mut req: EmployerSignupRequest) -> Result<(StatusCode, Json<AccountResponse>)> {
    req.email = normalize_email(&req.email);
    validate(&req)?;
    check_password(&req.password)?;

    let email = req.email.clone();
    let existing = Employers::find()
        .filter(employers::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let employer = employers::ActiveModel {
        name: Set(req.name.trim().to_string()),
        email: Set(email),
        password: Set(hash_plain(&req.password)?),
        company: Set(req.company),
        designation: Set(req.designation),
        is_verified: Set(false),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(employer_id = %employer.id, company = %employer.company, "Employer registered");

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::employer(
            "Employer registered successfully",
            AccountSummary {
                id:    employer.id,
                name:  employer.name,
                email: employer.email,
            },
        )),
    ))
}

/// `POST /api/employers/login`
pub async fn employer_login_handler(state: &AppState, mut req: LoginRequest) -> Result<Response> {
    req.email = normalize_email(&req.email);
    validate(&req)?;

    let employer = Employers::find()
        .filter(employers::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?
        .filter(|e| password_matches(&req.password, &e.password))
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    info!(employer_id = %employer.id, "Employer logged in");

    Ok(login_response(
        Role::Employer,
        &employer.id,
        state.secure_cookies,
        AccountResponse::employer(
            "Login successful",
            AccountSummary {
                id:    employer.id.clone(),
                name:  employer.name,
                email: employer.email,
            },
        ),
    ))
}

/// `POST /api/admin/signup`
pub async fn admin_signup_handler(state: &AppState, mut req: AdminSignupRequest) -> Result<(StatusCode, Json<AccountResponse>)> {
    req.email = normalize_email(&req.email);
    validate(&req)?;
    check_password(&req.password)?;

    let email = req.email.clone();
    let existing = Admins::find()
        .filter(admins::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let admin = admins::ActiveModel {
        name: Set(req.name.trim().to_string()),
        email: Set(email),
        password: Set(hash_plain(&req.password)?),
        role: Set(req.role.unwrap_or_default()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(admin_id = %admin.id, role = %admin.role, "Admin registered");

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::admin(
            "Admin registered successfully",
            AdminSummary {
                id:    admin.id,
                name:  admin.name,
                email: admin.email,
                role:  admin.role,
            },
        )),
    ))
}

/// `POST /api/admin/login`
pub async fn admin_login_handler(state: &AppState, mut req: LoginRequest) -> Result<Response> {
    req.email = normalize_email(&req.email);
    validate(&req)?;

    let admin = Admins::find()
        .filter(admins::Column::Email.eq(req.email.as_str()))
        .one(&state.db)
        .await?
        .filter(|a| password_matches(&req.password, &a.password))
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    info!(admin_id = %admin.id, "Admin logged in");

    Ok(login_response(
        Role::Admin,
        &admin.id,
        state.secure_cookies,
        AccountResponse::admin(
            "Login successful",
            AdminSummary {
                id:    admin.id.clone(),
                name:  admin.name,
                email: admin.email,
                role:  admin.role,
            },
        ),
    ))
}

/// `POST /api/auth/logout`: clears all three identity cookies.
pub fn logout_handler(state: &AppState) -> Response {
    let secure = state.secure_cookies;
    (
        AppendHeaders([
            (header::SET_COOKIE, Role::Student.clear_cookie(secure)),
            (header::SET_COOKIE, Role::Employer.clear_cookie(secure)),
            (header::SET_COOKIE, Role::Admin.clear_cookie(secure)),
        ]),
        Json(MessageResponse::new("Logged out successfully")),
    )
        .into_response()
}

/// `GET /api/admin/profile`
pub async fn admin_profile_handler(state: &AppState, admin_id: &str) -> Result<Json<admins::Model>> {
    let admin = Admins::find_by_id(admin_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Admin not found"))?;
    Ok(Json(admin))
}

/// `GET /api/students/profile`
pub async fn student_profile_handler(state: &AppState, student_id: &str) -> Result<Json<StudentProfile>> {
    let student = Students::find_by_id(student_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

    let university = match &student.university_id {
        Some(id) => {
            Universities::find_by_id(id.as_str())
                .one(&state.db)
                .await?
                .map(|u| {
                    UniversitySummary {
                        id:   u.id,
                        name: u.name,
                    }
                })
        },
        None => None,
    };

    let registrations = EventRegistrations::find()
        .filter(event_registrations::Column::StudentId.eq(student.id.as_str()))
        .find_also_related(Events)
        .order_by_asc(entity::events::Column::Date)
        .all(&state.db)
        .await?
        .into_iter()
        .filter_map(|(registration, event)| {
            event.map(|event| {
                RegistrationWithEvent {
                    id: registration.id,
                    created_at: registration.created_at,
                    event,
                }
            })
        })
        .collect();

    Ok(Json(StudentProfile {
        student,
        university,
        registrations,
    }))
}
