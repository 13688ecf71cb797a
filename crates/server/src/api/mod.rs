//! # Domain Handlers
//!
//! Handler bodies for every non-tracking endpoint. Each takes the
//! [`AppState`](crate::AppState) plus already extracted inputs and is wired
//! into routes by [`crate::router`].

pub mod accounts;
pub mod bookmarks;
pub mod employers;
pub mod events;
pub mod jobs;
pub mod resources;
pub mod stats;
pub mod students;
pub mod universities;

use std::collections::HashMap;

use error::{AppError, Result};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, SqlErr};
use validator::Validate;

/// Run the `validator` rules of a request body.
pub(crate) fn validate<T: Validate>(request: &T) -> Result<()> { request.validate().map_err(AppError::from) }

/// Count child rows per parent id in one grouped query.
///
/// Parents without children are absent from the map.
pub(crate) async fn count_by<E, C>(db: &C, fk: E::Column, parent_ids: Vec<String>) -> Result<HashMap<String, u64>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if parent_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(String, i64)> = E::find()
        .select_only()
        .column(fk)
        .column_as(
            sea_orm::sea_query::Expr::col((fk.entity_name(), fk)).count(),
            "count",
        )
        .filter(fk.is_in(parent_ids))
        .group_by(fk)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, count)| (id, count.max(0) as u64))
        .collect())
}

/// Normalised email used for lookups and storage.
pub(crate) fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

/// Turn a unique-index violation into a 400 carrying `message`; any other
/// store error passes through.
pub(crate) fn duplicate_as(message: &str) -> impl FnOnce(DbErr) -> AppError + '_ {
    move |err| {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::bad_request(message),
            _ => AppError::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_duplicate_as_passes_other_errors_through() {
        let err = duplicate_as("Job already bookmarked")(DbErr::Custom("connection reset".to_string()));
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
