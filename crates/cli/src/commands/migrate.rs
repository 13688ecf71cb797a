//! # CLI Migration Command

use anyhow::Context as _;
use migration::MigratorTrait as _;
use tracing::info;

use crate::commands::MigrateArgs;

/// Apply, preview or roll back migrations.
pub async fn migrate(database_url: &str, args: &MigrateArgs) -> anyhow::Result<()> {
    info!(
        target: "migrate",
        dry_run = %args.dry_run,
        rollback = %args.rollback,
        "Running database migrations..."
    );

    let db = migration::connect_to_database(database_url)
        .await
        .context("Failed to connect to database")?;

    if args.dry_run {
        let pending = migration::Migrator::get_pending_migrations(&db)
            .await
            .context("Failed to get pending migrations")?;

        info!(target: "migrate", pending_count = %pending.len(), "Pending migrations found");
        for m in &pending {
            info!(target: "migrate", migration = %m.name(), "Would apply");
        }
        return Ok(());
    }

    if args.rollback {
        info!(target: "migrate", "Rolling back the last migration...");
        migration::Migrator::down(&db, Some(1))
            .await
            .context("Failed to rollback migration")?;
        info!(target: "migrate", "Rollback completed successfully");
        return Ok(());
    }

    migration::Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    info!(target: "migrate", "Migrations completed successfully");
    Ok(())
}
