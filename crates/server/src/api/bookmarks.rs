//! Student job bookmarks.

use axum::{http::StatusCode, Json};
use entity::{bookmarked_jobs, BookmarkedJobs, Jobs};
use error::{AppError, MessageResponse, Page, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::{duplicate_as, jobs::with_employers};
use crate::{
    dto::students::{BookmarkItem, BookmarkStatus},
    query::{paginate, ListParams, PageRequest},
    utils::non_empty,
    AppState,
};

/// `GET /api/students/bookmarks`
pub async fn list_bookmarks_handler(state: &AppState, student_id: &str, params: ListParams) -> Result<Json<Page<BookmarkItem>>> {
    let request = PageRequest::from_params(&params, 10)?;
    let select = BookmarkedJobs::find()
        .filter(bookmarked_jobs::Column::StudentId.eq(student_id))
        .order_by_desc(bookmarked_jobs::Column::CreatedAt);
    let (bookmarks, pagination) = paginate(&state.db, select, request).await?;

    let job_ids: Vec<String> = bookmarks.iter().map(|b| b.job_id.clone()).collect();
    let jobs = if job_ids.is_empty() {
        Vec::new()
    }
    else {
        Jobs::find()
            .filter(entity::jobs::Column::Id.is_in(job_ids))
            .all(&state.db)
            .await?
    };
    let mut jobs: std::collections::HashMap<String, _> = with_employers(&state.db, jobs)
        .await?
        .into_iter()
        .map(|j| (j.job.id.clone(), j))
        .collect();

    // the job row cascades with its bookmarks, so every bookmark has one
    let items = bookmarks
        .into_iter()
        .filter_map(|bookmark| {
            jobs.remove(&bookmark.job_id).map(|job| {
                BookmarkItem {
                    id: bookmark.id,
                    created_at: bookmark.created_at,
                    job,
                }
            })
        })
        .collect();

    Ok(Json(Page::new(items, pagination)))
}

/// `POST /api/students/bookmarks`
pub async fn add_bookmark_handler(state: &AppState, student_id: &str, job_id: Option<String>) -> Result<(StatusCode, Json<bookmarked_jobs::Model>)> {
    let job_id = non_empty(job_id).ok_or_else(|| AppError::bad_request("Missing jobId"))?;

    Jobs::find_by_id(job_id.as_str())
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Job not found"))?;

    let bookmark = bookmarked_jobs::ActiveModel {
        student_id: Set(student_id.to_string()),
        job_id: Set(job_id),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(duplicate_as("Job already bookmarked"))?;

    info!(student_id = %student_id, job_id = %bookmark.job_id, "Job bookmarked");
    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// `GET /api/students/bookmarks/{jobId}`
pub async fn bookmark_status_handler(state: &AppState, student_id: &str, job_id: &str) -> Result<Json<BookmarkStatus>> {
    let is_bookmarked = BookmarkedJobs::find()
        .filter(bookmarked_jobs::Column::StudentId.eq(student_id))
        .filter(bookmarked_jobs::Column::JobId.eq(job_id))
        .one(&state.db)
        .await?
        .is_some();

    Ok(Json(BookmarkStatus {
        is_bookmarked,
    }))
}

/// `DELETE /api/students/bookmarks/{jobId}`
pub async fn remove_bookmark_handler(state: &AppState, student_id: &str, job_id: &str) -> Result<Json<MessageResponse>> {
    let result = BookmarkedJobs::delete_many()
        .filter(bookmarked_jobs::Column::StudentId.eq(student_id))
        .filter(bookmarked_jobs::Column::JobId.eq(job_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Bookmark not found"));
    }

    info!(student_id = %student_id, job_id = %job_id, "Bookmark removed");
    Ok(Json(MessageResponse::new("Bookmark removed successfully")))
}
