//! String backed enumerations shared by several tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Who a tracking session belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    #[sea_orm(string_value = "ANONYMOUS")]
    Anonymous,
    #[sea_orm(string_value = "STUDENT")]
    Student,
    #[sea_orm(string_value = "EMPLOYER")]
    Employer,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Anonymous => write!(f, "ANONYMOUS"),
            UserType::Student => write!(f, "STUDENT"),
            UserType::Employer => write!(f, "EMPLOYER"),
            UserType::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Administrator privilege level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    #[default]
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "SUPER_ADMIN")]
    SuperAdmin,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Admin => write!(f, "ADMIN"),
            AdminRole::SuperAdmin => write!(f, "SUPER_ADMIN"),
        }
    }
}

/// Moderation state of a job posting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "PENDING"),
            JobStatus::Approved => write!(f, "APPROVED"),
            JobStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Kind of event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[sea_orm(string_value = "WEBINAR")]
    Webinar,
    #[sea_orm(string_value = "WORKSHOP")]
    Workshop,
    #[sea_orm(string_value = "CONTEST")]
    Contest,
    #[default]
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Webinar => write!(f, "WEBINAR"),
            EventType::Workshop => write!(f, "WORKSHOP"),
            EventType::Contest => write!(f, "CONTEST"),
            EventType::Other => write!(f, "OTHER"),
        }
    }
}
