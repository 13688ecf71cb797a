//! # Job Handlers
//!
//! Employers post jobs, admins moderate them and everybody browses the
//! approved ones.

use std::collections::HashMap;

use axum::{http::StatusCode, Json};
use entity::{bookmarked_jobs, employers, jobs, sea_orm_active_enums::JobStatus, BookmarkedJobs, Employers, Jobs};
use error::{AppError, MessageResponse, Page, Result, ResultExt};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    IntoActiveModel,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};
use tracing::info;

use super::validate;
use crate::{
    dto::{
        jobs::{CreateJobRequest, JobDetail, JobWithEmployer, UpdateJobRequest, MAX_ACTIVE_JOBS},
        EmployerSummary,
    },
    query::{paginate, FilterSpec, ListParams, PageRequest},
    AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 10;

const EMPLOYER_JOBS: FilterSpec<jobs::Column> = FilterSpec {
    search: &[jobs::Column::Title, jobs::Column::Description],
    exact: &[("status", jobs::Column::Status)],
    ..FilterSpec::empty()
};

const ADMIN_JOBS: FilterSpec<jobs::Column> = FilterSpec {
    search: &[jobs::Column::Title, jobs::Column::Description, jobs::Column::Location],
    exact: &[("status", jobs::Column::Status), ("employerId", jobs::Column::EmployerId)],
    ..FilterSpec::empty()
};

const PUBLIC_JOBS: FilterSpec<jobs::Column> = FilterSpec {
    exact: &[("type", jobs::Column::JobType)],
    contains: &[("location", jobs::Column::Location), ("degree", jobs::Column::RequiredDegree)],
    flags: &[
        ("remote", jobs::Column::IsRemote),
        ("paid", jobs::Column::IsPaid),
        ("shortTerm", jobs::Column::IsShortTerm),
    ],
    ..FilterSpec::empty()
};

/// Attach the employer summary to each job with one extra query.
pub(crate) async fn with_employers<C: ConnectionTrait>(db: &C, jobs: Vec<jobs::Model>) -> Result<Vec<JobWithEmployer>> {
    let mut employer_ids: Vec<String> = jobs.iter().map(|j| j.employer_id.clone()).collect();
    employer_ids.sort();
    employer_ids.dedup();

    let employers: HashMap<String, EmployerSummary> = if employer_ids.is_empty() {
        HashMap::new()
    }
    else {
        Employers::find()
            .filter(employers::Column::Id.is_in(employer_ids))
            .all(db)
            .await?
            .iter()
            .map(|e| (e.id.clone(), EmployerSummary::from(e)))
            .collect()
    };

    Ok(jobs
        .into_iter()
        .map(|job| {
            JobWithEmployer {
                employer: employers.get(&job.employer_id).cloned(),
                job,
            }
        })
        .collect())
}

async fn find_job<C: ConnectionTrait>(db: &C, job_id: &str) -> Result<jobs::Model> {
    Jobs::find_by_id(job_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))
}

/// `POST /api/jobs`
///
/// Rejected postings do not count towards [`MAX_ACTIVE_JOBS`]. The count and
/// the insert are not atomic; two concurrent posts may both pass the check.
pub async fn create_job_handler(state: &AppState, employer_id: &str, req: CreateJobRequest) -> Result<(StatusCode, Json<jobs::Model>)> {
    validate(&req)?;

    Employers::find_by_id(employer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Employer not found"))?;

    let active = Jobs::find()
        .filter(jobs::Column::EmployerId.eq(employer_id))
        .filter(jobs::Column::Status.ne(JobStatus::Rejected))
        .count(&state.db)
        .await
        .context("Failed to count active jobs")?;
    if active >= MAX_ACTIVE_JOBS {
        return Err(AppError::forbidden(format!(
            "You have reached the maximum limit of {} job postings",
            MAX_ACTIVE_JOBS
        )));
    }

    let job = jobs::ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        job_type: Set(req.job_type),
        location: Set(req.location),
        stipend: Set(req.stipend),
        duration: Set(req.duration),
        apply_link: Set(req.apply_link),
        is_remote: Set(req.is_remote.unwrap_or(false)),
        is_paid: Set(req.is_paid.unwrap_or(true)),
        is_short_term: Set(req.is_short_term.unwrap_or(false)),
        required_degree: Set(req.required_degree.filter(|d| !d.trim().is_empty())),
        status: Set(JobStatus::Pending),
        employer_id: Set(employer_id.to_string()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(job_id = %job.id, employer_id = %employer_id, "Job created");

    Ok((StatusCode::CREATED, Json(job)))
}

/// `GET /api/jobs`: the calling employer's postings.
pub async fn employer_jobs_handler(state: &AppState, employer_id: &str, params: ListParams) -> Result<Json<Page<jobs::Model>>> {
    let request = PageRequest::from_params(&params, DEFAULT_PAGE_SIZE)?;
    let select = Jobs::find()
        .filter(jobs::Column::EmployerId.eq(employer_id))
        .filter(EMPLOYER_JOBS.condition(&params)?)
        .order_by_desc(jobs::Column::CreatedAt);

    let (items, pagination) = paginate(&state.db, select, request).await?;
    Ok(Json(Page::new(items, pagination)))
}

/// `GET /api/jobs/{id}` for a student.
pub async fn student_job_handler(state: &AppState, student_id: &str, job_id: &str) -> Result<Json<JobDetail>> {
    let job = find_job(&state.db, job_id).await?;

    let employer = Employers::find_by_id(job.employer_id.as_str())
        .one(&state.db)
        .await?
        .as_ref()
        .map(EmployerSummary::from);

    let is_bookmarked = BookmarkedJobs::find()
        .filter(bookmarked_jobs::Column::StudentId.eq(student_id))
        .filter(bookmarked_jobs::Column::JobId.eq(job.id.as_str()))
        .one(&state.db)
        .await?
        .is_some();

    Ok(Json(JobDetail {
        job,
        employer,
        is_bookmarked,
    }))
}

/// `GET /api/public/jobs`: approved postings only.
pub async fn public_jobs_handler(state: &AppState, params: ListParams) -> Result<Json<Page<JobWithEmployer>>> {
    let request = PageRequest::from_params(&params, DEFAULT_PAGE_SIZE)?;
    let select = Jobs::find()
        .filter(jobs::Column::Status.eq(JobStatus::Approved))
        .filter(PUBLIC_JOBS.condition(&params)?)
        .order_by_desc(jobs::Column::CreatedAt);

    let (items, pagination) = paginate(&state.db, select, request).await?;
    let items = with_employers(&state.db, items).await?;
    Ok(Json(Page::new(items, pagination)))
}

/// `GET /api/admin/jobs`
pub async fn admin_jobs_handler(state: &AppState, params: ListParams) -> Result<Json<Page<JobWithEmployer>>> {
    let request = PageRequest::from_params(&params, DEFAULT_PAGE_SIZE)?;
    let select = Jobs::find()
        .filter(ADMIN_JOBS.condition(&params)?)
        .order_by_desc(jobs::Column::CreatedAt);

    let (items, pagination) = paginate(&state.db, select, request).await?;
    let items = with_employers(&state.db, items).await?;
    Ok(Json(Page::new(items, pagination)))
}

/// `GET /api/admin/jobs/{id}`
pub async fn admin_job_handler(state: &AppState, job_id: &str) -> Result<Json<JobWithEmployer>> {
    let job = find_job(&state.db, job_id).await?;
    let mut items = with_employers(&state.db, vec![job]).await?;
    items
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::not_found("Job not found"))
}

/// `PATCH /api/admin/jobs/{id}`
pub async fn update_job_handler(state: &AppState, job_id: &str, req: UpdateJobRequest) -> Result<Json<jobs::Model>> {
    validate(&req)?;

    let job = find_job(&state.db, job_id).await?;
    let previous_status = job.status;
    let mut active = job.into_active_model();

    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(description);
    }
    if let Some(job_type) = req.job_type {
        active.job_type = Set(job_type);
    }
    if let Some(location) = req.location {
        active.location = Set(location);
    }
    if let Some(stipend) = req.stipend {
        active.stipend = Set(stipend);
    }
    if let Some(duration) = req.duration {
        active.duration = Set(duration);
    }
    if let Some(apply_link) = req.apply_link {
        active.apply_link = Set(apply_link);
    }
    if let Some(is_remote) = req.is_remote {
        active.is_remote = Set(is_remote);
    }
    if let Some(is_paid) = req.is_paid {
        active.is_paid = Set(is_paid);
    }
    if let Some(is_short_term) = req.is_short_term {
        active.is_short_term = Set(is_short_term);
    }
    if let Some(required_degree) = req.required_degree {
        active.required_degree = Set(Some(required_degree).filter(|d| !d.trim().is_empty()));
    }
    if let Some(status) = req.status {
        active.status = Set(status);
    }

    let job = active.update(&state.db).await?;

    if job.status != previous_status {
        info!(job_id = %job.id, from = %previous_status, to = %job.status, "Job status changed");
    }
    else {
        info!(job_id = %job.id, "Job updated");
    }

    Ok(Json(job))
}

/// `DELETE /api/admin/jobs/{id}`; bookmarks go with it.
pub async fn delete_job_handler(state: &AppState, job_id: &str) -> Result<Json<MessageResponse>> {
    let result = Jobs::delete_by_id(job_id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Job not found"));
    }

    info!(job_id = %job_id, "Job deleted");
    Ok(Json(MessageResponse::new("Job deleted successfully")))
}
