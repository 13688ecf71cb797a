//! Employers Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:          String,
    pub name:        String,
    #[sea_orm(unique)]
    pub email:       String,
    #[serde(skip_serializing, default)]
    pub password:    String,
    pub company:     String,
    pub designation: String,
    pub is_verified: bool,
    pub created_at:  DateTimeUtc,
    pub updated_at:  DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::jobs::Entity")]
    Jobs,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef { Relation::Jobs.def() }
}

impl_cuid_behavior!(created: created_at, updated: updated_at);
