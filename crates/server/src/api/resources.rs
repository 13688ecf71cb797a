//! Learning resources: browsing for everyone, download details for students
//! and admin maintenance.

use axum::{http::StatusCode, Json};
use entity::{resources, Resources};
use error::{AppError, MessageResponse, Result};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::info;

use super::validate;
use crate::{
    dto::resources::{CreateResourceRequest, ResourceListResponse, UpdateResourceRequest},
    query::{paginate, FilterSpec, ListParams, PageRequest},
    AppState,
};

const PUBLIC_RESOURCES: FilterSpec<resources::Column> = FilterSpec {
    exact: &[("type", resources::Column::ResourceType), ("category", resources::Column::Category)],
    ..FilterSpec::empty()
};

const ADMIN_RESOURCES: FilterSpec<resources::Column> = FilterSpec {
    search: &[resources::Column::Title, resources::Column::Description],
    ..PUBLIC_RESOURCES
};

/// Distinct values of one column, ascending.
async fn distinct_values<C: ConnectionTrait>(db: &C, column: resources::Column) -> Result<Vec<String>> {
    Ok(Resources::find()
        .select_only()
        .column(column)
        .group_by(column)
        .order_by_asc(column)
        .into_tuple::<String>()
        .all(db)
        .await?)
}

async fn list_resources(state: &AppState, params: ListParams, spec: &FilterSpec<resources::Column>, default_size: u64) -> Result<ResourceListResponse> {
    let request = PageRequest::from_params(&params, default_size)?;
    let select = Resources::find()
        .filter(spec.condition(&params)?)
        .order_by_desc(resources::Column::CreatedAt);

    let (items, pagination) = paginate(&state.db, select, request).await?;

    Ok(ResourceListResponse {
        items,
        categories: distinct_values(&state.db, resources::Column::Category).await?,
        types: distinct_values(&state.db, resources::Column::ResourceType).await?,
        pagination,
    })
}

async fn find_resource<C: ConnectionTrait>(db: &C, resource_id: &str) -> Result<resources::Model> {
    Resources::find_by_id(resource_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Resource not found"))
}

/// `GET /api/resources`
pub async fn public_resources_handler(state: &AppState, params: ListParams) -> Result<Json<ResourceListResponse>> {
    Ok(Json(list_resources(state, params, &PUBLIC_RESOURCES, 12).await?))
}

/// `GET /api/admin/resources`
pub async fn admin_resources_handler(state: &AppState, params: ListParams) -> Result<Json<ResourceListResponse>> {
    Ok(Json(list_resources(state, params, &ADMIN_RESOURCES, 10).await?))
}

/// `GET /api/resources/{id}` and `GET /api/admin/resources/{id}`
pub async fn get_resource_handler(state: &AppState, resource_id: &str) -> Result<Json<resources::Model>> {
    Ok(Json(find_resource(&state.db, resource_id).await?))
}

/// `POST /api/admin/resources`
pub async fn create_resource_handler(state: &AppState, req: CreateResourceRequest) -> Result<(StatusCode, Json<resources::Model>)> {
    validate(&req)?;

    let resource = resources::ActiveModel {
        title: Set(req.title),
        description: Set(req.description),
        resource_type: Set(req.resource_type.trim().to_string()),
        category: Set(req.category.trim().to_string()),
        file_url: Set(req.file_url),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(resource_id = %resource.id, category = %resource.category, "Resource created");
    Ok((StatusCode::CREATED, Json(resource)))
}

/// `PATCH /api/admin/resources/{id}`
pub async fn update_resource_handler(state: &AppState, resource_id: &str, req: UpdateResourceRequest) -> Result<Json<resources::Model>> {
    validate(&req)?;

    let mut resource = find_resource(&state.db, resource_id)
        .await?
        .into_active_model();

    if let Some(title) = req.title {
        resource.title = Set(title);
    }
    if let Some(description) = req.description {
        resource.description = Set(description);
    }
    if let Some(resource_type) = req.resource_type {
        resource.resource_type = Set(resource_type.trim().to_string());
    }
    if let Some(category) = req.category {
        resource.category = Set(category.trim().to_string());
    }
    if let Some(file_url) = req.file_url {
        resource.file_url = Set(file_url);
    }

    let resource = resource.update(&state.db).await?;
    info!(resource_id = %resource.id, "Resource updated");
    Ok(Json(resource))
}

/// `DELETE /api/admin/resources/{id}`
pub async fn delete_resource_handler(state: &AppState, resource_id: &str) -> Result<Json<MessageResponse>> {
    let result = Resources::delete_by_id(resource_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Resource not found"));
    }

    info!(resource_id = %resource_id, "Resource deleted");
    Ok(Json(MessageResponse::new("Resource deleted successfully")))
}
