//! Jobs Entity
//!
//! Job postings owned by an employer and moderated by admins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::JobStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:              String,
    pub title:           String,
    pub description:     String,
    /// e.g. "Internship", "Full-time"
    #[serde(rename = "type")]
    pub job_type:        String,
    pub location:        String,
    pub stipend:         String,
    pub duration:        String,
    pub apply_link:      String,
    pub is_remote:       bool,
    pub is_paid:         bool,
    pub is_short_term:   bool,
    pub required_degree: Option<String>,
    pub status:          JobStatus,
    pub employer_id:     String,
    pub created_at:      DateTimeUtc,
    pub updated_at:      DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employers::Entity",
        from = "Column::EmployerId",
        to = "super::employers::Column::Id",
        on_delete = "Cascade"
    )]
    Employer,
    #[sea_orm(has_many = "super::bookmarked_jobs::Entity")]
    BookmarkedJobs,
}

impl Related<super::employers::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employer.def() }
}

impl Related<super::bookmarked_jobs::Entity> for Entity {
    fn to() -> RelationDef { Relation::BookmarkedJobs.def() }
}

impl_cuid_behavior!(created: created_at, updated: updated_at);
