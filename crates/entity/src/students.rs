//! Students Entity
//!
//! Student accounts. The password hash is never serialized.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            String,
    pub name:          String,
    #[sea_orm(unique)]
    pub email:         String,
    #[serde(skip_serializing, default)]
    pub password:      String,
    pub college:       String,
    pub degree:        String,
    pub year:          i32,
    /// JSON array of strings
    pub interests:     Json,
    pub cv_path:       Option<String>,
    pub is_verified:   bool,
    pub university_id: Option<String>,
    pub created_at:    DateTimeUtc,
    pub updated_at:    DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::universities::Entity",
        from = "Column::UniversityId",
        to = "super::universities::Column::Id",
        on_delete = "Restrict"
    )]
    University,
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    EventRegistrations,
    #[sea_orm(has_many = "super::bookmarked_jobs::Entity")]
    BookmarkedJobs,
}

impl Related<super::universities::Entity> for Entity {
    fn to() -> RelationDef { Relation::University.def() }
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef { Relation::EventRegistrations.def() }
}

impl Related<super::bookmarked_jobs::Entity> for Entity {
    fn to() -> RelationDef { Relation::BookmarkedJobs.def() }
}

impl_cuid_behavior!(created: created_at, updated: updated_at);
