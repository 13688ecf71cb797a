//! # Seed Data
//!
//! Initial rows every deployment needs: a super administrator so the admin
//! area can be reached, and the sample partner university shown on the
//! landing page. Every seed checks for its rows first and can be re-run.

use ::error::{AppError, SeedResult};
use entity::{
    admins,
    sea_orm_active_enums::AdminRole,
    universities,
    Admins,
    Universities,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::SeaDb;

/// Trait for seed data providers
#[async_trait::async_trait]
pub trait SeedProvider: Send + Sync {
    /// The name of this seed
    fn name(&self) -> &str;

    /// Runs the seed operation
    ///
    /// # Errors
    ///
    /// Returns an error if the seed operation fails.
    async fn run(&self, db: &SeaDb) -> Result<SeedResult, AppError>;
}

/// Values the seeds need from the environment.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    pub admin_name:     String,
    pub admin_email:    String,
    /// No super admin is created without a password.
    pub admin_password: Option<String>,
}

impl SeedConfig {
    /// Read `PORTAL_SEED_ADMIN_NAME`, `PORTAL_SEED_ADMIN_EMAIL` and
    /// `PORTAL_SEED_ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        Self {
            admin_name:     std::env::var("PORTAL_SEED_ADMIN_NAME").unwrap_or_else(|_| "Super Admin".to_string()),
            admin_email:    std::env::var("PORTAL_SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string()),
            admin_password: std::env::var("PORTAL_SEED_ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
        }
    }
}

/// Creates the first `SUPER_ADMIN` account.
pub struct SuperAdminSeed {
    config: SeedConfig,
}

impl SuperAdminSeed {
    pub fn new(config: SeedConfig) -> Self {
        Self {
            config,
        }
    }
}

#[async_trait::async_trait]
impl SeedProvider for SuperAdminSeed {
    fn name(&self) -> &str { "super_admin" }

    async fn run(&self, db: &SeaDb) -> Result<SeedResult, AppError> {
        let existing = Admins::find()
            .filter(admins::Column::Role.eq(AdminRole::SuperAdmin))
            .count(db)
            .await?;
        if existing > 0 {
            return Ok(SeedResult::success(self.name(), 0));
        }

        let Some(password) = self.config.admin_password.as_deref()
        else {
            tracing::warn!("PORTAL_SEED_ADMIN_PASSWORD is not set, skipping super admin seed");
            return Ok(SeedResult::success(self.name(), 0));
        };

        admins::ActiveModel {
            name: Set(self.config.admin_name.clone()),
            email: Set(self.config.admin_email.to_lowercase()),
            password: Set(auth::hash_plain(password)?),
            role: Set(AdminRole::SuperAdmin),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(email = %self.config.admin_email, "Created super admin");
        Ok(SeedResult::success(self.name(), 1))
    }
}

pub const SAMPLE_UNIVERSITY_NAME: &str = "Alphonso Mango University";

/// Inserts the sample partner university.
pub struct PartnerUniversitySeed;

#[async_trait::async_trait]
impl SeedProvider for PartnerUniversitySeed {
    fn name(&self) -> &str { "partner_university" }

    async fn run(&self, db: &SeaDb) -> Result<SeedResult, AppError> {
        let existing = Universities::find()
            .filter(universities::Column::Name.eq(SAMPLE_UNIVERSITY_NAME))
            .count(db)
            .await?;
        if existing > 0 {
            return Ok(SeedResult::success(self.name(), 0));
        }

        universities::ActiveModel {
            name: Set(SAMPLE_UNIVERSITY_NAME.to_string()),
            location: Set("Ratnagiri, Maharashtra, India".to_string()),
            website: Set(Some("https://www.alphonsomangouniversity.edu".to_string())),
            logo_url: Set(Some(
                "https://images.unsplash.com/photo-1553279768-865429fa0078?q=80&w=1974&auto=format&fit=crop".to_string(),
            )),
            description: Set(Some(
                "Alphonso Mango University is a premier institution specializing in agricultural sciences with a \
                 focus on mango cultivation and research. Established in 1985, the university has been at the \
                 forefront of sustainable farming practices and new techniques for mango production."
                    .to_string(),
            )),
            partnership_benefits: Set(Some(
                "Students receive access to internships in agricultural technology companies, research \
                 opportunities in the university laboratories and global exchange programs with leading \
                 agricultural institutions."
                    .to_string(),
            )),
            is_partner: Set(true),
            is_visible: Set(true),
            display_order: Set(1),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(SeedResult::success(self.name(), 1))
    }
}

/// Runs all registered seed providers in order.
///
/// A failing provider is recorded in its [`SeedResult`] and the remaining
/// providers still run.
///
/// # Errors
///
/// Currently never fails as a whole; per-seed failures are reported in the
/// returned results.
pub async fn run_all_seeds(db: &SeaDb, config: &SeedConfig, verbose: bool) -> Result<Vec<SeedResult>, AppError> {
    let providers: Vec<Box<dyn SeedProvider>> = vec![
        Box::new(PartnerUniversitySeed),
        Box::new(SuperAdminSeed::new(config.clone())),
    ];

    let mut results = Vec::with_capacity(providers.len());
    for provider in providers {
        let result = match provider.run(db).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(seed = provider.name(), error = %e, "Seed failed");
                SeedResult::with_error(provider.name(), e.message())
            },
        };
        if verbose {
            tracing::info!(
                seed = %result.seed_name,
                inserted = result.inserted_count,
                "Seed finished"
            );
        }
        results.push(result);
    }

    Ok(results)
}
