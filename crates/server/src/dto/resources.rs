//! # Resource Data Transfer Objects

use entity::resources;
use error::PaginationMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title:         String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description:   String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub resource_type: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category:      String,
    #[validate(length(min = 1, message = "File URL is required"))]
    pub file_url:      String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title:         Option<String>,
    pub description:   Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub category:      Option<String>,
    pub file_url:      Option<String>,
}

/// Resource page plus the distinct categories and types for filter menus.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceListResponse {
    pub items:      Vec<resources::Model>,
    pub categories: Vec<String>,
    pub types:      Vec<String>,
    pub pagination: PaginationMeta,
}
