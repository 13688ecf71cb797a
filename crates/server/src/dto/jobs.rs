//! # Job Data Transfer Objects

use entity::{jobs, sea_orm_active_enums::JobStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EmployerSummary;

/// Maximum number of active (not rejected) postings per employer.
pub const MAX_ACTIVE_JOBS: u64 = 5;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title:           String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description:     String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Job type is required"))]
    pub job_type:        String,
    #[validate(length(min = 2, message = "Location must be at least 2 characters"))]
    pub location:        String,
    #[validate(length(min = 1, message = "Stipend is required"))]
    pub stipend:         String,
    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration:        String,
    #[validate(url(message = "Apply link must be a valid URL"))]
    pub apply_link:      String,
    pub is_remote:       Option<bool>,
    pub is_paid:         Option<bool>,
    pub is_short_term:   Option<bool>,
    pub required_degree: Option<String>,
}

/// Admin edit of a posting; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title:           Option<String>,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description:     Option<String>,
    #[serde(rename = "type")]
    pub job_type:        Option<String>,
    pub location:        Option<String>,
    pub stipend:         Option<String>,
    pub duration:        Option<String>,
    #[validate(url(message = "Apply link must be a valid URL"))]
    pub apply_link:      Option<String>,
    pub is_remote:       Option<bool>,
    pub is_paid:         Option<bool>,
    pub is_short_term:   Option<bool>,
    pub required_degree: Option<String>,
    pub status:          Option<JobStatus>,
}

/// A job with its employer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithEmployer {
    #[serde(flatten)]
    pub job:      jobs::Model,
    pub employer: Option<EmployerSummary>,
}

/// A job as seen by a student.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    #[serde(flatten)]
    pub job:           jobs::Model,
    pub employer:      Option<EmployerSummary>,
    pub is_bookmarked: bool,
}
