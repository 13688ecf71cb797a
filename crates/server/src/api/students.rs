//! Admin management of student accounts.

use std::collections::HashMap;

use axum::Json;
use entity::{students, universities, Students, Universities};
use error::{AppError, MessageResponse, Page, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::validate;
use crate::{
    dto::{
        students::{StudentWithUniversity, UpdateStudentRequest},
        universities::UniversitySummary,
    },
    query::{paginate, FilterSpec, ListParams, PageRequest},
    AppState,
};

const ADMIN_STUDENTS: FilterSpec<students::Column> = FilterSpec {
    search: &[students::Column::Name, students::Column::Email, students::Column::College],
    exact: &[("universityId", students::Column::UniversityId)],
    flags: &[("verified", students::Column::IsVerified)],
    ..FilterSpec::empty()
};

async fn with_universities<C: ConnectionTrait>(db: &C, students: Vec<students::Model>) -> Result<Vec<StudentWithUniversity>> {
    let ids: Vec<String> = students
        .iter()
        .filter_map(|s| s.university_id.clone())
        .collect();

    let universities: HashMap<String, UniversitySummary> = if ids.is_empty() {
        HashMap::new()
    }
    else {
        Universities::find()
            .filter(universities::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| {
                (u.id.clone(), UniversitySummary {
                    id:   u.id,
                    name: u.name,
                })
            })
            .collect()
    };

    Ok(students
        .into_iter()
        .map(|student| {
            StudentWithUniversity {
                university: student
                    .university_id
                    .as_ref()
                    .and_then(|id| universities.get(id).cloned()),
                student,
            }
        })
        .collect())
}

async fn find_student<C: ConnectionTrait>(db: &C, student_id: &str) -> Result<students::Model> {
    Students::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))
}

/// `GET /api/admin/students`
pub async fn list_students_handler(state: &AppState, params: ListParams) -> Result<Json<Page<StudentWithUniversity>>> {
    let request = PageRequest::from_params(&params, 10)?;
    let select = Students::find()
        .filter(ADMIN_STUDENTS.condition(&params)?)
        .order_by_desc(students::Column::CreatedAt);

    let (items, pagination) = paginate(&state.db, select, request).await?;
    let items = with_universities(&state.db, items).await?;
    Ok(Json(Page::new(items, pagination)))
}

/// `GET /api/admin/students/{id}`
pub async fn get_student_handler(state: &AppState, student_id: &str) -> Result<Json<StudentWithUniversity>> {
    let student = find_student(&state.db, student_id).await?;
    let mut items = with_universities(&state.db, vec![student]).await?;
    items
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::not_found("Student not found"))
}

/// `PATCH /api/admin/students/{id}`
pub async fn update_student_handler(state: &AppState, student_id: &str, req: UpdateStudentRequest) -> Result<Json<students::Model>> {
    validate(&req)?;

    let mut student = find_student(&state.db, student_id)
        .await?
        .into_active_model();

    if let Some(name) = req.name {
        student.name = Set(name);
    }
    if let Some(college) = req.college {
        student.college = Set(college);
    }
    if let Some(degree) = req.degree {
        student.degree = Set(degree);
    }
    if let Some(year) = req.year {
        student.year = Set(year);
    }
    if let Some(interests) = req.interests {
        student.interests = Set(serde_json::json!(interests));
    }
    if let Some(cv_path) = req.cv_path {
        student.cv_path = Set(Some(cv_path).filter(|p| !p.is_empty()));
    }
    if let Some(is_verified) = req.is_verified {
        student.is_verified = Set(is_verified);
    }
    if let Some(university_id) = req.university_id {
        if university_id.is_empty() {
            student.university_id = Set(None);
        }
        else {
            Universities::find_by_id(university_id.as_str())
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::not_found("University not found"))?;
            student.university_id = Set(Some(university_id));
        }
    }

    let student = student.update(&state.db).await?;
    info!(student_id = %student.id, "Student updated");
    Ok(Json(student))
}

/// `DELETE /api/admin/students/{id}`
pub async fn delete_student_handler(state: &AppState, student_id: &str) -> Result<Json<MessageResponse>> {
    let result = Students::delete_by_id(student_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Student not found"));
    }

    info!(student_id = %student_id, "Student deleted");
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
