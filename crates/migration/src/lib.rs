//! # Schema Migrations
//!
//! The portal schema as a sea-orm-migration [`Migrator`], written with the
//! schema builder only so the same migrations run on PostgreSQL and SQLite,
//! plus idempotent seed data in [`seeds`].

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_account_tables;
mod m20250101_000002_create_jobs_tables;
mod m20250101_000003_create_events_tables;
mod m20250101_000004_create_resources_table;
mod m20250101_000005_create_tracking_tables;
pub mod seeds;

/// Connection type used by seeds and the CLI.
pub type SeaDb = sea_orm::DatabaseConnection;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_account_tables::Migration),
            Box::new(m20250101_000002_create_jobs_tables::Migration),
            Box::new(m20250101_000003_create_events_tables::Migration),
            Box::new(m20250101_000004_create_resources_table::Migration),
            Box::new(m20250101_000005_create_tracking_tables::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<SeaDb, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}
