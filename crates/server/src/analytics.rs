//! # Analytics Aggregator
//!
//! Read-only aggregation over sessions, page views and actions for a time
//! window. Sessions are bucketed by start time, page views by entry time and
//! actions by timestamp.

use std::collections::{BTreeMap, HashSet};

use axum::Json;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use entity::{page_views, tracking_sessions, user_actions, PageViews, TrackingSessions, UserActions};
use error::{AppError, Result};
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    Order,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
};

use crate::{
    dto::analytics::{ActionTypeCount, AnalyticsQuery, AnalyticsReport, DailyCount, PathCount, UserTypeCount},
    utils::{end_of_day, parse_datetime_param, start_of_day},
    AppState,
};

/// Number of entries in `topPages`.
pub const TOP_PAGES_LIMIT: u64 = 10;

/// Inclusive time window of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsRange {
    pub start: DateTime<Utc>,
    pub end:   DateTime<Utc>,
}

impl AnalyticsRange {
    /// Resolve the window of a query relative to `now`.
    ///
    /// An explicit `startDate`/`endDate` pair wins over the period and the end
    /// is pushed to the last millisecond of its day. Otherwise the period
    /// picks the start and the window ends at `now`. Unknown periods fall back
    /// to `day`; `custom` without both dates is rejected.
    pub fn resolve(query: &AnalyticsQuery, now: DateTime<Utc>) -> Result<Self> {
        let start_date = query.start_date.as_deref().filter(|s| !s.trim().is_empty());
        let end_date = query.end_date.as_deref().filter(|s| !s.trim().is_empty());

        if let (Some(start), Some(end)) = (start_date, end_date) {
            let start = parse_datetime_param("startDate", start.trim())?;
            let end = end_of_day(parse_datetime_param("endDate", end.trim())?.date_naive());
            if start > end {
                return Err(AppError::bad_request("startDate must not be after endDate"));
            }
            return Ok(Self {
                start,
                end,
            });
        }

        let start = match query.period.as_deref().unwrap_or("day") {
            "custom" => {
                return Err(AppError::bad_request(
                    "startDate and endDate are required for a custom period",
                ))
            },
            "week" => now - Duration::days(7),
            "month" => now.checked_sub_months(Months::new(1)).unwrap_or(now),
            "year" => now.checked_sub_months(Months::new(12)).unwrap_or(now),
            _ => start_of_day(now.date_naive()),
        };

        Ok(Self {
            start,
            end: now,
        })
    }

    fn on<C: ColumnTrait>(&self, column: C) -> SimpleExpr { column.between(self.start, self.end) }
}

/// Group `rows` of (user id, session start) into distinct users per day.
pub fn daily_active_users(rows: impl IntoIterator<Item = (String, DateTime<Utc>)>) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, HashSet<String>> = BTreeMap::new();
    for (user_id, started) in rows {
        days.entry(started.date_naive()).or_default().insert(user_id);
    }
    days.into_iter()
        .map(|(date, users)| {
            DailyCount {
                date,
                count: users.len() as u64,
            }
        })
        .collect()
}

fn count_expr<C: ColumnTrait>(column: C) -> SimpleExpr { Expr::col((column.entity_name(), column)).count() }

/// Compute the report for `range`.
pub async fn aggregate<C>(db: &C, range: AnalyticsRange) -> Result<AnalyticsReport>
where
    C: ConnectionTrait,
{
    let sessions_in_range = TrackingSessions::find().filter(range.on(tracking_sessions::Column::StartTime));

    let total_sessions = sessions_in_range.clone().count(db).await?;
    let active_sessions = sessions_in_range
        .clone()
        .filter(tracking_sessions::Column::EndTime.is_null())
        .count(db)
        .await?;
    let total_page_views = PageViews::find()
        .filter(range.on(page_views::Column::EntryTime))
        .count(db)
        .await?;
    let total_actions = UserActions::find()
        .filter(range.on(user_actions::Column::Timestamp))
        .count(db)
        .await?;

    let durations: Vec<i64> = sessions_in_range
        .clone()
        .select_only()
        .column(tracking_sessions::Column::Duration)
        .filter(tracking_sessions::Column::Duration.is_not_null())
        .into_tuple()
        .all(db)
        .await?;
    let average_session_duration = if durations.is_empty() {
        0.0
    }
    else {
        durations.iter().map(|&d| d as f64).sum::<f64>() / durations.len() as f64
    };

    let user_type_distribution = sessions_in_range
        .clone()
        .select_only()
        .column(tracking_sessions::Column::UserType)
        .column_as(count_expr(tracking_sessions::Column::Id), "count")
        .group_by(tracking_sessions::Column::UserType)
        .order_by(count_expr(tracking_sessions::Column::Id), Order::Desc)
        .order_by_asc(tracking_sessions::Column::UserType)
        .into_tuple::<(String, i64)>()
        .all(db)
        .await?
        .into_iter()
        .map(|(user_type, count)| {
            UserTypeCount {
                user_type,
                count,
            }
        })
        .collect();

    let top_pages = PageViews::find()
        .filter(range.on(page_views::Column::EntryTime))
        .select_only()
        .column(page_views::Column::Path)
        .column_as(count_expr(page_views::Column::Id), "count")
        .group_by(page_views::Column::Path)
        .order_by(count_expr(page_views::Column::Id), Order::Desc)
        .order_by_asc(page_views::Column::Path)
        .limit(TOP_PAGES_LIMIT)
        .into_tuple::<(String, i64)>()
        .all(db)
        .await?
        .into_iter()
        .map(|(path, count)| {
            PathCount {
                path,
                count,
            }
        })
        .collect();

    let top_actions = UserActions::find()
        .filter(range.on(user_actions::Column::Timestamp))
        .select_only()
        .column(user_actions::Column::ActionType)
        .column_as(count_expr(user_actions::Column::Id), "count")
        .group_by(user_actions::Column::ActionType)
        .order_by(count_expr(user_actions::Column::Id), Order::Desc)
        .order_by_asc(user_actions::Column::ActionType)
        .into_tuple::<(String, i64)>()
        .all(db)
        .await?
        .into_iter()
        .map(|(action_type, count)| {
            ActionTypeCount {
                action_type,
                count,
            }
        })
        .collect();

    let identified: Vec<(String, DateTime<Utc>)> = sessions_in_range
        .select_only()
        .column(tracking_sessions::Column::UserId)
        .column(tracking_sessions::Column::StartTime)
        .filter(tracking_sessions::Column::UserId.is_not_null())
        .into_tuple()
        .all(db)
        .await?;

    Ok(AnalyticsReport {
        total_sessions,
        active_sessions,
        total_page_views,
        total_actions,
        average_session_duration,
        user_type_distribution,
        top_pages,
        top_actions,
        daily_active_users: daily_active_users(identified),
        start_date: range.start,
        end_date: range.end,
    })
}

/// `GET /api/admin/analytics`
pub async fn analytics_handler(state: &AppState, query: AnalyticsQuery) -> Result<Json<AnalyticsReport>> {
    let range = AnalyticsRange::resolve(&query, Utc::now())?;
    let report = aggregate(&state.db, range).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 3, 31, 15, 20, 0).unwrap() }

    fn query(period: Option<&str>, start: Option<&str>, end: Option<&str>) -> AnalyticsQuery {
        AnalyticsQuery {
            period:     period.map(str::to_string),
            start_date: start.map(str::to_string),
            end_date:   end.map(str::to_string),
        }
    }

    #[test]
    fn test_default_is_start_of_day() {
        let range = AnalyticsRange::resolve(&query(None, None, None), now()).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap());
        assert_eq!(range.end, now());
    }

    #[test]
    fn test_presets() {
        let week = AnalyticsRange::resolve(&query(Some("week"), None, None), now()).unwrap();
        assert_eq!(week.start, now() - Duration::days(7));

        // March 31 minus one month clamps to the end of February
        let month = AnalyticsRange::resolve(&query(Some("month"), None, None), now()).unwrap();
        assert_eq!(month.start, Utc.with_ymd_and_hms(2025, 2, 28, 15, 20, 0).unwrap());

        let year = AnalyticsRange::resolve(&query(Some("year"), None, None), now()).unwrap();
        assert_eq!(year.start, Utc.with_ymd_and_hms(2024, 3, 31, 15, 20, 0).unwrap());
    }

    #[test]
    fn test_unknown_period_falls_back_to_day() {
        let range = AnalyticsRange::resolve(&query(Some("decade"), None, None), now()).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_explicit_dates_win() {
        let range = AnalyticsRange::resolve(&query(Some("year"), Some("2025-01-01"), Some("2025-01-15")), now()).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            range.end,
            Utc.with_ymd_and_hms(2025, 1, 15, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_custom_requires_both_dates() {
        let err = AnalyticsRange::resolve(&query(Some("custom"), Some("2025-01-01"), None), now()).unwrap_err();
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_reversed_dates_rejected() {
        assert!(AnalyticsRange::resolve(&query(None, Some("2025-02-01"), Some("2025-01-01")), now()).is_err());
    }

    #[test]
    fn test_daily_active_users_distinct_and_sorted() {
        let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap();
        let daily = daily_active_users(vec![
            ("s2".to_string(), day(2, 9)),
            ("s1".to_string(), day(1, 9)),
            ("s1".to_string(), day(1, 18)),
            ("e1".to_string(), day(1, 10)),
            ("s1".to_string(), day(2, 11)),
        ]);
        assert_eq!(
            daily,
            vec![
                DailyCount {
                    date:  NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    count: 2,
                },
                DailyCount {
                    date:  NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                    count: 2,
                },
            ]
        );
    }
}
