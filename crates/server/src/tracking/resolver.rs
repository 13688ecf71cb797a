//! Session resolver.
//!
//! Maps a client session token to its stored row, creating it on first
//! sight and backfilling the identity once the visitor logs in.

use auth::{Identity, IdentityError, Role, SessionIdentity};
use entity::{tracking_sessions, TrackingSessions};
use error::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

/// Request metadata stored on a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub user_agent: Option<String>,
    pub referrer:   Option<String>,
    pub ip_address: Option<String>,
}

/// Find or create the session for `session_id`.
///
/// An existing anonymous session is moved to `identity` when the caller is
/// identified. An identified session keeps its identity even if a different
/// caller reuses the token.
pub async fn resolve_session<C>(
    db: &C,
    session_id: &str,
    identity: &Identity,
    meta: RequestMeta,
) -> Result<tracking_sessions::Model>
where
    C: ConnectionTrait,
{
    let existing = TrackingSessions::find()
        .filter(tracking_sessions::Column::SessionId.eq(session_id))
        .one(db)
        .await?;

    match existing {
        Some(session) => backfill(db, session, identity).await,
        None => {
            let session = tracking_sessions::ActiveModel {
                session_id: Set(session_id.to_string()),
                user_type: Set(identity.user_type()),
                user_id: Set(identity.user_id().map(str::to_string)),
                student_id: Set(identity.id_for(Role::Student).map(str::to_string)),
                employer_id: Set(identity.id_for(Role::Employer).map(str::to_string)),
                user_agent: Set(meta.user_agent),
                referrer: Set(meta.referrer),
                ip_address: Set(meta.ip_address),
                ..Default::default()
            }
            .insert(db)
            .await?;

            tracing::debug!(session_id, user_type = %session.user_type, "Tracking session created");
            Ok(session)
        },
    }
}

async fn backfill<C>(db: &C, session: tracking_sessions::Model, identity: &Identity) -> Result<tracking_sessions::Model>
where
    C: ConnectionTrait,
{
    let stored = SessionIdentity::from_stored(&session.user_type, session.user_id.as_deref());

    match stored.identify(identity) {
        Ok(Some(_)) => {
            let session_id = session.session_id.clone();
            let mut active: tracking_sessions::ActiveModel = session.into();
            active.user_type = Set(identity.user_type());
            active.user_id = Set(identity.user_id().map(str::to_string));
            active.student_id = Set(identity.id_for(Role::Student).map(str::to_string));
            active.employer_id = Set(identity.id_for(Role::Employer).map(str::to_string));
            let session = active.update(db).await?;

            tracing::info!(session_id = %session_id, user_type = %session.user_type, "Tracking session identified");
            Ok(session)
        },
        Ok(None) => Ok(session),
        Err(IdentityError::AlreadyIdentified) => {
            if !identity.is_anonymous() && identity.user_id() != session.user_id.as_deref() {
                tracing::debug!(
                    session_id = %session.session_id,
                    "Ignoring identity change on an identified session"
                );
            }
            Ok(session)
        },
    }
}
