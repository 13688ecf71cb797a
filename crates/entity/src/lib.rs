//! Entity definitions for the portal
//!
//! Sea-ORM entity definitions for the relational schema. Primary keys are CUID2
//! strings assigned on insert, enumerations are stored as plain strings so the
//! schema works on both PostgreSQL and SQLite.

/// Implements `ActiveModelBehavior` so inserts get a fresh CUID2 id and the
/// named timestamp columns are stamped automatically.
macro_rules! impl_cuid_behavior {
    ($(created: $created:ident)? $(, updated: $updated:ident)?) => {
        #[async_trait::async_trait]
        impl sea_orm::ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, sea_orm::DbErr>
            where
                C: sea_orm::ConnectionTrait,
            {
                #[allow(unused_variables)]
                let now = chrono::Utc::now();
                if insert && self.id.is_not_set() {
                    self.id = sea_orm::Set($crate::new_id());
                }
                $(
                    if insert && self.$created.is_not_set() {
                        self.$created = sea_orm::Set(now);
                    }
                )?
                $(
                    self.$updated = sea_orm::Set(now);
                )?
                Ok(self)
            }
        }
    };
}

pub mod sea_orm_active_enums;

pub mod admins;
pub use admins::Entity as Admins;
pub mod bookmarked_jobs;
pub use bookmarked_jobs::Entity as BookmarkedJobs;
pub mod employers;
pub use employers::Entity as Employers;
pub mod event_registrations;
pub use event_registrations::Entity as EventRegistrations;
pub mod events;
pub use events::Entity as Events;
pub mod jobs;
pub use jobs::Entity as Jobs;
pub mod page_views;
pub use page_views::Entity as PageViews;
pub mod resources;
pub use resources::Entity as Resources;
pub mod students;
pub use students::Entity as Students;
pub mod tracking_sessions;
pub use tracking_sessions::Entity as TrackingSessions;
pub mod universities;
pub use universities::Entity as Universities;
pub mod user_actions;
pub use user_actions::Entity as UserActions;

/// Generate a new primary key.
pub fn new_id() -> String { cuid2::cuid() }
