//! Action recorder. Actions are append-only.

use entity::{tracking_sessions, user_actions};
use error::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use serde_json::Value;

pub async fn record_action<C>(
    db: &C,
    session: &tracking_sessions::Model,
    action_type: &str,
    action_data: Value,
    path: &str,
) -> Result<user_actions::Model>
where
    C: ConnectionTrait,
{
    let action = user_actions::ActiveModel {
        session_id: Set(session.id.clone()),
        action_type: Set(action_type.to_string()),
        action_data: Set(action_data),
        path: Set(path.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(action)
}
