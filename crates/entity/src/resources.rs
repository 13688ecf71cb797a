//! Resources Entity
//!
//! Downloadable learning material grouped by category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            String,
    pub title:         String,
    pub description:   String,
    /// e.g. "PDF", "VIDEO"
    #[serde(rename = "type")]
    pub resource_type: String,
    pub category:      String,
    pub file_url:      String,
    pub created_at:    DateTimeUtc,
    pub updated_at:    DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl_cuid_behavior!(created: created_at, updated: updated_at);
