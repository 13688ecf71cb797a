//! Admin dashboard totals.

use axum::Json;
use entity::{jobs, sea_orm_active_enums::JobStatus, Employers, Events, Jobs, Resources, Students, Universities};
use error::{Result, ResultExt};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{dto::students::AdminStats, AppState};

/// `GET /api/admin/stats`
pub async fn admin_stats_handler(state: &AppState) -> Result<Json<AdminStats>> {
    let db = &state.db;

    let stats = AdminStats {
        student_count:     Students::find().count(db).await.context("Failed to count students")?,
        employer_count:    Employers::find().count(db).await.context("Failed to count employers")?,
        job_count:         Jobs::find().count(db).await.context("Failed to count jobs")?,
        pending_job_count: Jobs::find()
            .filter(jobs::Column::Status.eq(JobStatus::Pending))
            .count(db)
            .await
            .context("Failed to count pending jobs")?,
        event_count:       Events::find().count(db).await.context("Failed to count events")?,
        university_count:  Universities::find().count(db).await.context("Failed to count universities")?,
        resource_count:    Resources::find().count(db).await.context("Failed to count resources")?,
    };

    Ok(Json(stats))
}
