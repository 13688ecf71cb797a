//! Admin view of employer accounts.

use axum::Json;
use entity::{employers, jobs, Employers, Jobs};
use error::{AppError, Page, Result};
use sea_orm::{EntityTrait, QueryFilter, QueryOrder};

use super::count_by;
use crate::{
    dto::students::EmployerWithCount,
    query::{paginate, FilterSpec, ListParams, PageRequest},
    AppState,
};

const ADMIN_EMPLOYERS: FilterSpec<employers::Column> = FilterSpec {
    search: &[employers::Column::Name, employers::Column::Email, employers::Column::Company],
    flags: &[("verified", employers::Column::IsVerified)],
    ..FilterSpec::empty()
};

/// `GET /api/admin/employers`
pub async fn list_employers_handler(state: &AppState, params: ListParams) -> Result<Json<Page<EmployerWithCount>>> {
    let request = PageRequest::from_params(&params, 10)?;
    let select = Employers::find()
        .filter(ADMIN_EMPLOYERS.condition(&params)?)
        .order_by_desc(employers::Column::CreatedAt);

    let (items, pagination) = paginate(&state.db, select, request).await?;
    let counts = count_by::<Jobs, _>(&state.db, jobs::Column::EmployerId, items.iter().map(|e| e.id.clone()).collect()).await?;

    let page = Page::new(items, pagination).map(|employer| {
        EmployerWithCount {
            job_count: counts.get(&employer.id).copied().unwrap_or(0),
            employer,
        }
    });
    Ok(Json(page))
}

/// `GET /api/admin/employers/{id}`
pub async fn get_employer_handler(state: &AppState, employer_id: &str) -> Result<Json<EmployerWithCount>> {
    let employer = Employers::find_by_id(employer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Employer not found"))?;

    let counts = count_by::<Jobs, _>(&state.db, jobs::Column::EmployerId, vec![employer.id.clone()]).await?;

    Ok(Json(EmployerWithCount {
        job_count: counts.get(&employer.id).copied().unwrap_or(0),
        employer,
    }))
}
