//! Events Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::EventType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:                String,
    pub title:             String,
    pub description:       String,
    pub date:              DateTimeUtc,
    pub end_date:          Option<DateTimeUtc>,
    pub location:          String,
    pub event_type:        EventType,
    /// `None` means unlimited
    pub capacity:          Option<i32>,
    pub is_virtual:        bool,
    pub registration_link: Option<String>,
    pub created_at:        DateTimeUtc,
    pub updated_at:        DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    Registrations,
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef { Relation::Registrations.def() }
}

impl_cuid_behavior!(created: created_at, updated: updated_at);
