//! # University Handlers
//!
//! The public partner directory and its admin maintenance, including the
//! drag-and-drop reorder.

use axum::{http::StatusCode, Json};
use entity::{students, universities, Students, Universities};
use error::{AppError, MessageResponse, Page, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    IntoActiveModel,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Select,
    Set,
    TransactionTrait,
};
use tracing::info;

use super::{count_by, validate};
use crate::{
    dto::universities::{CreateUniversityRequest, ReorderRequest, UniversityWithCount, UpdateUniversityRequest},
    query::{paginate, FilterSpec, ListParams, PageRequest},
    utils::non_empty,
    AppState,
};

const ADMIN_UNIVERSITIES: FilterSpec<universities::Column> = FilterSpec {
    search: &[universities::Column::Name, universities::Column::Location],
    flags: &[("isPartner", universities::Column::IsPartner)],
    ..FilterSpec::empty()
};

fn display_ordered(select: Select<Universities>) -> Select<Universities> {
    select
        .order_by_asc(universities::Column::DisplayOrder)
        .order_by_asc(universities::Column::Name)
}

async fn find_university<C: ConnectionTrait>(db: &C, university_id: &str) -> Result<universities::Model> {
    Universities::find_by_id(university_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("University not found"))
}

/// `GET /api/universities`: visible universities, partners only unless
/// `partners=false`.
pub async fn public_universities_handler(state: &AppState, params: ListParams) -> Result<Json<Vec<universities::Model>>> {
    let mut select = Universities::find().filter(universities::Column::IsVisible.eq(true));
    if params.get("partners") != Some("false") {
        select = select.filter(universities::Column::IsPartner.eq(true));
    }

    let universities = display_ordered(select).all(&state.db).await?;
    Ok(Json(universities))
}

/// `GET /api/admin/universities`
pub async fn admin_universities_handler(state: &AppState, params: ListParams) -> Result<Json<Page<UniversityWithCount>>> {
    let request = PageRequest::from_params(&params, 10)?;
    let select = display_ordered(Universities::find().filter(ADMIN_UNIVERSITIES.condition(&params)?));

    let (items, pagination) = paginate(&state.db, select, request).await?;
    let counts = count_by::<Students, _>(
        &state.db,
        students::Column::UniversityId,
        items.iter().map(|u| u.id.clone()).collect(),
    )
    .await?;

    Ok(Json(Page::new(items, pagination).map(|university| {
        UniversityWithCount {
            student_count: counts.get(&university.id).copied().unwrap_or(0),
            university,
        }
    })))
}

/// `POST /api/admin/universities`
pub async fn create_university_handler(state: &AppState, req: CreateUniversityRequest) -> Result<(StatusCode, Json<universities::Model>)> {
    validate(&req)?;

    let university = universities::ActiveModel {
        name: Set(req.name.trim().to_string()),
        location: Set(req.location.trim().to_string()),
        website: Set(non_empty(req.website)),
        logo_url: Set(non_empty(req.logo_url)),
        description: Set(non_empty(req.description)),
        partnership_benefits: Set(non_empty(req.partnership_benefits)),
        is_partner: Set(req.is_partner.unwrap_or(false)),
        is_visible: Set(req.is_visible.unwrap_or(true)),
        display_order: Set(req.display_order.unwrap_or(0)),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(university_id = %university.id, name = %university.name, "University created");
    Ok((StatusCode::CREATED, Json(university)))
}

/// `GET /api/admin/universities/{id}`
pub async fn get_university_handler(state: &AppState, university_id: &str) -> Result<Json<UniversityWithCount>> {
    let university = find_university(&state.db, university_id).await?;
    let student_count = Students::find()
        .filter(students::Column::UniversityId.eq(university.id.as_str()))
        .count(&state.db)
        .await?;

    Ok(Json(UniversityWithCount {
        university,
        student_count,
    }))
}

/// `PATCH /api/admin/universities/{id}`
pub async fn update_university_handler(
    state: &AppState,
    university_id: &str,
    req: UpdateUniversityRequest,
) -> Result<Json<universities::Model>> {
    validate(&req)?;

    let mut university = find_university(&state.db, university_id)
        .await?
        .into_active_model();

    if let Some(name) = req.name {
        university.name = Set(name.trim().to_string());
    }
    if let Some(location) = req.location {
        university.location = Set(location.trim().to_string());
    }
    if req.website.is_some() {
        university.website = Set(non_empty(req.website));
    }
    if req.logo_url.is_some() {
        university.logo_url = Set(non_empty(req.logo_url));
    }
    if req.description.is_some() {
        university.description = Set(non_empty(req.description));
    }
    if req.partnership_benefits.is_some() {
        university.partnership_benefits = Set(non_empty(req.partnership_benefits));
    }
    if let Some(is_partner) = req.is_partner {
        university.is_partner = Set(is_partner);
    }
    if let Some(is_visible) = req.is_visible {
        university.is_visible = Set(is_visible);
    }
    if let Some(display_order) = req.display_order {
        university.display_order = Set(display_order);
    }

    let university = university.update(&state.db).await?;
    info!(university_id = %university.id, "University updated");
    Ok(Json(university))
}

/// `DELETE /api/admin/universities/{id}`
///
/// Refused while any student still references the university.
pub async fn delete_university_handler(state: &AppState, university_id: &str) -> Result<Json<MessageResponse>> {
    let university = find_university(&state.db, university_id).await?;

    let student_count = Students::find()
        .filter(students::Column::UniversityId.eq(university.id.as_str()))
        .count(&state.db)
        .await?;
    if student_count > 0 {
        return Err(AppError::bad_request("Cannot delete university with associated students"));
    }

    Universities::delete_by_id(university.id.as_str())
        .exec(&state.db)
        .await?;

    info!(university_id = %university.id, "University deleted");
    Ok(Json(MessageResponse::new("University deleted successfully")))
}

/// `POST /api/admin/universities/reorder`
///
/// Each university's display order becomes its index in the request. All
/// updates commit together; an unknown id aborts the whole batch.
pub async fn reorder_universities_handler(state: &AppState, req: ReorderRequest) -> Result<Json<MessageResponse>> {
    if req.universities.is_empty() {
        return Err(AppError::bad_request("Universities array is required"));
    }

    let txn = state.db.begin().await?;
    for (index, item) in req.universities.iter().enumerate() {
        let display_order = i32::try_from(index).map_err(|_| AppError::bad_request("Too many universities"))?;
        let result = Universities::update_many()
            .col_expr(
                universities::Column::DisplayOrder,
                sea_orm::sea_query::Expr::value(display_order),
            )
            .col_expr(
                universities::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(universities::Column::Id.eq(item.id.as_str()))
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("University {} not found", item.id)));
        }
    }
    txn.commit().await?;

    info!(count = req.universities.len(), "Universities reordered");
    Ok(Json(MessageResponse::new("Universities reordered successfully")))
}
