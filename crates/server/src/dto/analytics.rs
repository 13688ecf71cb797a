//! # Analytics Data Transfer Objects

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Query of `GET /api/admin/analytics`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// `day` (default), `week`, `month`, `year` or `custom`
    pub period:     Option<String>,
    pub start_date: Option<String>,
    pub end_date:   Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserTypeCount {
    pub user_type: String,
    pub count:     i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathCount {
    pub path:  String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionTypeCount {
    pub action_type: String,
    pub count:       i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date:  NaiveDate,
    pub count: u64,
}

/// Aggregated tracking figures for one time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_sessions:           u64,
    /// Sessions in the window without an end time
    pub active_sessions:          u64,
    pub total_page_views:         u64,
    pub total_actions:            u64,
    /// Mean of the recorded session durations in seconds, 0 without any
    pub average_session_duration: f64,
    pub user_type_distribution:   Vec<UserTypeCount>,
    pub top_pages:                Vec<PathCount>,
    pub top_actions:              Vec<ActionTypeCount>,
    pub daily_active_users:       Vec<DailyCount>,
    pub start_date:               DateTime<Utc>,
    pub end_date:                 DateTime<Utc>,
}
