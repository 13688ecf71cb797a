//! `SeaORM` Entity for tracking_sessions
//!
//! One row per client supplied session identifier. Rows are never deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::UserType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tracking_sessions")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:          String,
    /// Opaque token generated by the client
    #[sea_orm(unique)]
    pub session_id:  String,
    pub user_type:   UserType,
    pub user_id:     Option<String>,
    pub student_id:  Option<String>,
    pub employer_id: Option<String>,
    pub start_time:  DateTimeUtc,
    pub end_time:    Option<DateTimeUtc>,
    /// Seconds
    pub duration:    Option<i64>,
    pub user_agent:  Option<String>,
    pub referrer:    Option<String>,
    pub ip_address:  Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::page_views::Entity")]
    PageViews,
    #[sea_orm(has_many = "super::user_actions::Entity")]
    UserActions,
}

impl Related<super::page_views::Entity> for Entity {
    fn to() -> RelationDef { Relation::PageViews.def() }
}

impl Related<super::user_actions::Entity> for Entity {
    fn to() -> RelationDef { Relation::UserActions.def() }
}

impl_cuid_behavior!(created: start_time);
