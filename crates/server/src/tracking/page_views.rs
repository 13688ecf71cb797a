//! Page view tracker.

use chrono::{DateTime, Utc};
use entity::{page_views, tracking_sessions, PageViews};
use error::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// Whole seconds between `from` and `to`, never negative.
pub fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 { (to - from).num_seconds().max(0) }

/// Close the open views of `path` in `session`, then open a new one.
///
/// The most recent open view gets the client supplied `duration` when there
/// is one; every other closed view gets its wall clock duration. This keeps
/// at most one open view per path even after a lost insert race left two.
pub async fn record_page_view<C>(
    db: &C,
    session: &tracking_sessions::Model,
    path: &str,
    title: Option<String>,
    duration: Option<i64>,
) -> Result<page_views::Model>
where
    C: ConnectionTrait,
{
    let now = Utc::now();

    let open_views = PageViews::find()
        .filter(page_views::Column::SessionId.eq(session.id.as_str()))
        .filter(page_views::Column::Path.eq(path))
        .filter(page_views::Column::ExitTime.is_null())
        .order_by_desc(page_views::Column::EntryTime)
        .all(db)
        .await?;

    for (index, view) in open_views.into_iter().enumerate() {
        let closed_duration = match duration {
            Some(client) if index == 0 => client,
            _ => elapsed_seconds(view.entry_time, now),
        };
        let mut active: page_views::ActiveModel = view.into();
        active.exit_time = Set(Some(now));
        active.duration = Set(Some(closed_duration));
        active.update(db).await?;
    }

    let view = page_views::ActiveModel {
        session_id: Set(session.id.clone()),
        path: Set(path.to_string()),
        title: Set(title),
        entry_time: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(view)
}
