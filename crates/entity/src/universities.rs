//! Universities Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "universities")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                   String,
    pub name:                 String,
    pub location:             String,
    pub website:              Option<String>,
    pub logo_url:             Option<String>,
    pub description:          Option<String>,
    pub partnership_benefits: Option<String>,
    pub is_partner:           bool,
    pub is_visible:           bool,
    pub display_order:        i32,
    pub created_at:           DateTimeUtc,
    pub updated_at:           DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef { Relation::Students.def() }
}

impl_cuid_behavior!(created: created_at, updated: updated_at);
