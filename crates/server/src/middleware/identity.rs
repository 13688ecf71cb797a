//! # Identity Gates
//!
//! Route layers that require one of the identity cookies and place the
//! caller in the request extensions. Student and employer gates check for
//! the cookie only. The admin gate also requires the id to belong to a stored
//! admin.

use auth::{IdentityCookies, Role};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use entity::{sea_orm_active_enums::AdminRole, Admins};
use error::{AppError, Result};
use sea_orm::EntityTrait;

use crate::AppState;

/// Admin resolved from the `adminId` cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub id:   String,
    pub role: AdminRole,
}

/// Student id from the `studentId` cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedStudent {
    pub id: String,
}

/// Employer id from the `employerId` cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedEmployer {
    pub id: String,
}

fn cookie_id(request: &Request, role: Role) -> Result<String> {
    IdentityCookies::from_headers(request.headers())
        .get(role)
        .map(str::to_string)
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))
}

pub async fn require_admin(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response> {
    let id = cookie_id(&request, Role::Admin)?;

    let admin = Admins::find_by_id(id.as_str())
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            tracing::debug!(admin_id = %id, "Unknown admin id in cookie");
            AppError::unauthorized("Unauthorized")
        })?;

    request.extensions_mut().insert(AuthenticatedAdmin {
        id:   admin.id,
        role: admin.role,
    });
    Ok(next.run(request).await)
}

pub async fn require_student(mut request: Request, next: Next) -> Result<Response> {
    let id = cookie_id(&request, Role::Student)?;
    request.extensions_mut().insert(AuthenticatedStudent {
        id,
    });
    Ok(next.run(request).await)
}

pub async fn require_employer(mut request: Request, next: Next) -> Result<Response> {
    let id = cookie_id(&request, Role::Employer)?;
    request.extensions_mut().insert(AuthenticatedEmployer {
        id,
    });
    Ok(next.run(request).await)
}
