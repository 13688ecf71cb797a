//! # Tracking Pipeline
//!
//! Ingestion of the browser beacons: every call resolves the session first,
//! then records a page view, an action or the end of the session. Each call
//! runs in one transaction.

pub mod actions;
pub mod closer;
pub mod page_views;
pub mod resolver;

use std::net::SocketAddr;

use auth::{Identity, IdentityCookies};
use axum::{extract::rejection::JsonRejection, Json};
use entity::{PageViews, TrackingSessions, UserActions};
use error::{Result, ResultExt as _};
use http::{header, HeaderMap};
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};

pub use actions::record_action;
pub use closer::end_session;
pub use page_views::record_page_view;
pub use resolver::{resolve_session, RequestMeta};

use crate::{
    dto::tracking::{TrackEvent, TrackRequest, TrackResponse, TrackingSummary},
    utils::{client_ip, header_string},
    AppState,
};

impl RequestMeta {
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self {
            user_agent: header_string(headers, header::USER_AGENT),
            referrer:   header_string(headers, header::REFERER),
            ip_address: client_ip(headers, peer),
        }
    }
}

/// `POST /api/track`
pub async fn track_handler(
    state: &AppState,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    body: std::result::Result<Json<TrackRequest>, JsonRejection>,
) -> Result<Json<TrackResponse>> {
    let Json(request) = body?;
    let (session_id, event) = request.into_event()?;

    let identity = Identity::resolve(&IdentityCookies::from_headers(headers));
    let meta = RequestMeta::from_request(headers, peer);

    let txn = state.db.begin().await?;
    let session = resolve_session(&txn, &session_id, &identity, meta).await?;

    let response = match &event {
        TrackEvent::PageView {
            path,
            title,
            duration,
        } => {
            let view = record_page_view(&txn, &session, path, title.clone(), *duration).await?;
            logging::log_tracking_event!(event.kind(), session_id, path = %path);
            TrackResponse::page_view(view)
        },
        TrackEvent::Action {
            action_type,
            action_data,
            path,
        } => {
            let action = record_action(&txn, &session, action_type, action_data.clone(), path).await?;
            logging::log_tracking_event!(event.kind(), session_id, action_type = %action_type);
            TrackResponse::user_action(action)
        },
        TrackEvent::SessionEnd {
            duration,
        } => {
            let session = end_session(&txn, session, *duration).await?;
            logging::log_tracking_event!(event.kind(), session_id);
            TrackResponse::session(session)
        },
    };

    txn.commit().await.log_error()?;
    Ok(Json(response))
}

/// `GET /api/track`: raw totals of the three tracking tables.
pub async fn tracking_summary_handler(state: &AppState) -> Result<Json<TrackingSummary>> {
    let session_count = TrackingSessions::find().count(&state.db).await?;
    let page_view_count = PageViews::find().count(&state.db).await?;
    let action_count = UserActions::find().count(&state.db).await?;

    Ok(Json(TrackingSummary {
        session_count,
        page_view_count,
        action_count,
    }))
}
