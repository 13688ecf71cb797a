//! # Student, Employer and Bookmark Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::{employers, events, students};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{jobs::JobWithEmployer, universities::UniversitySummary};

/// Admin edit of a student; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name:          Option<String>,
    pub college:       Option<String>,
    pub degree:        Option<String>,
    #[validate(range(min = 1, max = 6, message = "Year must be between 1 and 6"))]
    pub year:          Option<i32>,
    pub interests:     Option<Vec<String>>,
    pub cv_path:       Option<String>,
    pub is_verified:   Option<bool>,
    pub university_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentWithUniversity {
    #[serde(flatten)]
    pub student:    students::Model,
    pub university: Option<UniversitySummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationWithEvent {
    pub id:         String,
    pub created_at: DateTime<Utc>,
    pub event:      events::Model,
}

/// The logged in student with their event registrations.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student:       students::Model,
    pub university:    Option<UniversitySummary>,
    pub registrations: Vec<RegistrationWithEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerWithCount {
    #[serde(flatten)]
    pub employer:  employers::Model,
    pub job_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkItem {
    pub id:         String,
    pub created_at: DateTime<Utc>,
    pub job:        JobWithEmployer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStatus {
    pub is_bookmarked: bool,
}

/// Entity totals for the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub student_count:     u64,
    pub employer_count:    u64,
    pub job_count:         u64,
    pub pending_job_count: u64,
    pub event_count:       u64,
    pub university_count:  u64,
    pub resource_count:    u64,
}
