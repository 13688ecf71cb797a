//! # Event Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::{event_registrations, events, sea_orm_active_enums::EventType};
use error::PaginationMeta;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::AccountSummary;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title:             String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description:       String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    #[validate(length(min = 1, message = "Date is required"))]
    pub date:              String,
    pub end_date:          Option<String>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location:          String,
    pub event_type:        Option<EventType>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity:          Option<i32>,
    pub is_virtual:        Option<bool>,
    pub registration_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title:             Option<String>,
    pub description:       Option<String>,
    pub date:              Option<String>,
    pub end_date:          Option<String>,
    pub location:          Option<String>,
    pub event_type:        Option<EventType>,
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity:          Option<i32>,
    pub is_virtual:        Option<bool>,
    pub registration_link: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithCount {
    #[serde(flatten)]
    pub event:              events::Model,
    pub registration_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event:              events::Model,
    pub registration_count: u64,
    pub is_registered:      bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    pub items:       Vec<EventWithCount>,
    pub event_types: Vec<EventType>,
    pub pagination:  PaginationMeta,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationItem {
    pub id:         String,
    pub created_at: DateTime<Utc>,
    pub student:    Option<StudentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    #[serde(flatten)]
    pub account: AccountSummary,
    pub college: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationListResponse {
    pub items:      Vec<RegistrationItem>,
    pub capacity:   Option<i32>,
    pub pagination: PaginationMeta,
}

/// Answer to a successful registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub message:      String,
    pub registration: event_registrations::Model,
}
