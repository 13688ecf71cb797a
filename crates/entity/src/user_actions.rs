//! `SeaORM` Entity for user_actions
//!
//! Append-only log of discrete interactions such as downloads or clicks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_actions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:          String,
    pub session_id:  String,
    /// Free-form tag such as `RESOURCE_DOWNLOAD`
    pub action_type: String,
    pub action_data: Json,
    pub path:        String,
    pub timestamp:   DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tracking_sessions::Entity",
        from = "Column::SessionId",
        to = "super::tracking_sessions::Column::Id",
        on_delete = "Cascade"
    )]
    TrackingSession,
}

impl Related<super::tracking_sessions::Entity> for Entity {
    fn to() -> RelationDef { Relation::TrackingSession.def() }
}

impl_cuid_behavior!(created: timestamp);
