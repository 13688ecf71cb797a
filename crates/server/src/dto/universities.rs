//! # University Data Transfer Objects

use entity::universities;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUniversityRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name:                 String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location:             String,
    pub website:              Option<String>,
    pub logo_url:             Option<String>,
    pub description:          Option<String>,
    pub partnership_benefits: Option<String>,
    pub is_partner:           Option<bool>,
    pub is_visible:           Option<bool>,
    pub display_order:        Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUniversityRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name:                 Option<String>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location:             Option<String>,
    pub website:              Option<String>,
    pub logo_url:             Option<String>,
    pub description:          Option<String>,
    pub partnership_benefits: Option<String>,
    pub is_partner:           Option<bool>,
    pub is_visible:           Option<bool>,
    pub display_order:        Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderItem {
    pub id: String,
}

/// New display order: position in the array.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub universities: Vec<ReorderItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityWithCount {
    #[serde(flatten)]
    pub university:    universities::Model,
    pub student_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversitySummary {
    pub id:   String,
    pub name: String,
}
