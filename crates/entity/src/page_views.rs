//! `SeaORM` Entity for page_views

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page_views")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:         String,
    /// References `tracking_sessions.id`, not the client token
    pub session_id: String,
    pub path:       String,
    pub title:      Option<String>,
    pub entry_time: DateTimeUtc,
    /// `None` while the view is open
    pub exit_time:  Option<DateTimeUtc>,
    pub duration:   Option<i64>,
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

impl_cuid_behavior!(created: entry_time);
