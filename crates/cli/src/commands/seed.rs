//! # CLI Seed Command

use anyhow::Context as _;
use migration::seeds::{run_all_seeds, SeedConfig};
use tracing::{info, warn};

/// Run every seed against an already migrated database.
pub async fn seed(database_url: &str) -> anyhow::Result<()> {
    let db = migration::connect_to_database(database_url)
        .await
        .context("Failed to connect to database")?;

    let results = run_all_seeds(&db, &SeedConfig::from_env(), true)
        .await
        .context("Seeding failed")?;

    let inserted: usize = results.iter().map(|r| r.inserted_count).sum();
    let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
    for result in &failed {
        warn!(target: "seed", seed = %result.seed_name, errors = ?result.errors, "Seed reported errors");
    }

    if !failed.is_empty() {
        anyhow::bail!("{} seed(s) failed", failed.len());
    }

    info!(target: "seed", inserted, "Seed data completed successfully");
    Ok(())
}
