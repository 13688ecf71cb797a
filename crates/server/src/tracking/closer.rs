//! Session closer.

use chrono::Utc;
use entity::{page_views, tracking_sessions, PageViews};
use error::Result;
use sea_orm::{sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use super::page_views::elapsed_seconds;

/// Stamp the end of `session` and close all of its open page views.
///
/// Closed views only get an exit time. Calling this again moves the end time
/// and duration forward.
pub async fn end_session<C>(db: &C, session: tracking_sessions::Model, duration: Option<i64>) -> Result<tracking_sessions::Model>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let duration = duration.unwrap_or_else(|| elapsed_seconds(session.start_time, now));

    let mut active: tracking_sessions::ActiveModel = session.into();
    active.end_time = Set(Some(now));
    active.duration = Set(Some(duration));
    let session = active.update(db).await?;

    let closed = PageViews::update_many()
        .col_expr(page_views::Column::ExitTime, Expr::value(now))
        .filter(page_views::Column::SessionId.eq(session.id.as_str()))
        .filter(page_views::Column::ExitTime.is_null())
        .exec(db)
        .await?;

    tracing::debug!(
        session_id = %session.session_id,
        duration,
        closed_views = closed.rows_affected,
        "Tracking session ended"
    );
    Ok(session)
}
