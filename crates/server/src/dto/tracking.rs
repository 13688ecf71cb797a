//! # Tracking Data Transfer Objects
//!
//! Body of `POST /api/track` and the shapes it answers with.

use entity::{page_views, tracking_sessions, user_actions};
use error::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw tracking beacon as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub session_id:  Option<String>,
    pub event_type:  Option<String>,
    pub path:        Option<String>,
    pub title:       Option<String>,
    /// Seconds, as measured by the client
    pub duration:    Option<f64>,
    pub action_type: Option<String>,
    pub action_data: Option<Value>,
}

/// A validated tracking event.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    PageView {
        path:     String,
        title:    Option<String>,
        duration: Option<i64>,
    },
    Action {
        action_type: String,
        action_data: Value,
        path:        String,
    },
    SessionEnd {
        duration: Option<i64>,
    },
}

impl TrackEvent {
    /// Wire name of the event type.
    pub fn kind(&self) -> &'static str {
        match self {
            TrackEvent::PageView {
                ..
            } => "pageView",
            TrackEvent::Action {
                ..
            } => "action",
            TrackEvent::SessionEnd {
                ..
            } => "sessionEnd",
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whole seconds from a client supplied duration. Negative and non-finite
/// values are rejected.
fn client_duration(duration: Option<f64>) -> Result<Option<i64>> {
    match duration {
        None => Ok(None),
        Some(d) if d.is_finite() && d >= 0.0 => Ok(Some(d.floor() as i64)),
        Some(_) => Err(AppError::bad_request("duration must be a non-negative number")),
    }
}

impl TrackRequest {
    /// Validate the beacon and split it into the client session id and the
    /// event to record.
    pub fn into_event(self) -> Result<(String, TrackEvent)> {
        let (Some(session_id), Some(event_type)) = (required(self.session_id), required(self.event_type))
        else {
            return Err(AppError::bad_request("Missing required fields"));
        };

        let event = match event_type.as_str() {
            "pageView" => {
                let path = required(self.path).ok_or_else(|| AppError::bad_request("Path is required for pageView events"))?;
                TrackEvent::PageView {
                    path,
                    title: required(self.title),
                    duration: client_duration(self.duration)?,
                }
            },
            "action" => {
                let (Some(action_type), Some(path)) = (required(self.action_type), required(self.path))
                else {
                    return Err(AppError::bad_request(
                        "ActionType and path are required for action events",
                    ));
                };
                let action_data = match self.action_data {
                    None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
                    Some(data) => data,
                };
                TrackEvent::Action {
                    action_type,
                    action_data,
                    path,
                }
            },
            "sessionEnd" => {
                TrackEvent::SessionEnd {
                    duration: client_duration(self.duration)?,
                }
            },
            _ => return Err(AppError::bad_request("Invalid event type")),
        };

        Ok((session_id, event))
    }
}

/// `{success: true, <record>}` answer of the tracking endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub success:     bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_view:   Option<page_views::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_action: Option<user_actions::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session:     Option<tracking_sessions::Model>,
}

impl TrackResponse {
    fn empty() -> Self {
        Self {
            success:     true,
            page_view:   None,
            user_action: None,
            session:     None,
        }
    }

    pub fn page_view(view: page_views::Model) -> Self {
        Self {
            page_view: Some(view),
            ..Self::empty()
        }
    }

    pub fn user_action(action: user_actions::Model) -> Self {
        Self {
            user_action: Some(action),
            ..Self::empty()
        }
    }

    pub fn session(session: tracking_sessions::Model) -> Self {
        Self {
            session: Some(session),
            ..Self::empty()
        }
    }
}

/// Raw table totals for `GET /api/track`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSummary {
    pub session_count:   u64,
    pub page_view_count: u64,
    pub action_count:    u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(value: Value) -> TrackRequest { serde_json::from_value(value).unwrap() }

    #[test]
    fn test_page_view() {
        let (session, event) = request(json!({
            "sessionId": "s1", "eventType": "pageView", "path": "/jobs", "title": "", "duration": 12.7
        }))
        .into_event()
        .unwrap();
        assert_eq!(session, "s1");
        assert_eq!(
            event,
            TrackEvent::PageView {
                path:     "/jobs".into(),
                title:    None,
                duration: Some(12),
            }
        );
    }

    #[test]
    fn test_missing_session_or_type() {
        for body in [
            json!({"eventType": "pageView", "path": "/"}),
            json!({"sessionId": "s1"}),
            json!({"sessionId": "", "eventType": "pageView"}),
        ] {
            let err = request(body).into_event().unwrap_err();
            assert_eq!(err.message(), "Missing required fields");
        }
    }

    #[test]
    fn test_page_view_requires_path() {
        let err = request(json!({"sessionId": "s1", "eventType": "pageView"}))
            .into_event()
            .unwrap_err();
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_action_requires_type_and_path() {
        let err = request(json!({"sessionId": "s1", "eventType": "action", "path": "/jobs"}))
            .into_event()
            .unwrap_err();
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_action_data_defaults_to_object() {
        let (_, event) = request(json!({
            "sessionId": "s1", "eventType": "action", "actionType": "CLICK", "path": "/jobs", "actionData": null
        }))
        .into_event()
        .unwrap();
        match event {
            TrackEvent::Action {
                action_data, ..
            } => assert_eq!(action_data, json!({})),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_type() {
        let err = request(json!({"sessionId": "s1", "eventType": "scroll"}))
            .into_event()
            .unwrap_err();
        assert_eq!(err.message(), "Invalid event type");
    }

    #[test]
    fn test_negative_duration_rejected_zero_kept() {
        assert!(request(json!({"sessionId": "s1", "eventType": "sessionEnd", "duration": -3}))
            .into_event()
            .is_err());

        let (_, event) = request(json!({"sessionId": "s1", "eventType": "sessionEnd", "duration": 0}))
            .into_event()
            .unwrap();
        assert_eq!(
            event,
            TrackEvent::SessionEnd {
                duration: Some(0),
            }
        );
    }
}
