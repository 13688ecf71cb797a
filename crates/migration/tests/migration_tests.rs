//! Migrations and seeds against an in-memory SQLite database.

use entity::{sea_orm_active_enums::AdminRole, Admins, Universities};
use migration::{
    seeds::{run_all_seeds, SeedConfig, SAMPLE_UNIVERSITY_NAME},
    Migrator,
    MigratorTrait,
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait};

async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Database::connect(options).await.unwrap()
}

async fn table_exists(db: &DatabaseConnection, name: &str) -> bool {
    let stmt = sea_orm::Statement::from_sql_and_values(
        db.get_database_backend(),
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
        [name.into()],
    );
    db.query_one(stmt).await.unwrap().is_some()
}

const TABLES: [&str; 12] = [
    "universities",
    "students",
    "employers",
    "admins",
    "jobs",
    "bookmarked_jobs",
    "events",
    "event_registrations",
    "resources",
    "tracking_sessions",
    "page_views",
    "user_actions",
];

#[tokio::test]
async fn test_up_creates_every_table() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    for table in TABLES {
        assert!(table_exists(&db, table).await, "missing table {table}");
    }
}

#[tokio::test]
async fn test_down_removes_every_table() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    Migrator::down(&db, None).await.unwrap();

    for table in TABLES {
        assert!(!table_exists(&db, table).await, "table {table} survived rollback");
    }
}

#[tokio::test]
async fn test_seeds_are_idempotent() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    let config = SeedConfig {
        admin_name:     "Root".to_string(),
        admin_email:    "Root@Example.com".to_string(),
        admin_password: Some("SeedPass123".to_string()),
    };

    let first = run_all_seeds(&db, &config, false).await.unwrap();
    assert!(first.iter().all(|r| r.is_success()));
    assert_eq!(first.iter().map(|r| r.inserted_count).sum::<usize>(), 2);

    let second = run_all_seeds(&db, &config, true).await.unwrap();
    assert_eq!(second.iter().map(|r| r.inserted_count).sum::<usize>(), 0);

    assert_eq!(Universities::find().count(&db).await.unwrap(), 1);
    let admins = Admins::find().all(&db).await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].role, AdminRole::SuperAdmin);
    assert_eq!(admins[0].email, "root@example.com");
    assert!(auth::password_matches("SeedPass123", &admins[0].password));

    let university = Universities::find().one(&db).await.unwrap().unwrap();
    assert_eq!(university.name, SAMPLE_UNIVERSITY_NAME);
    assert!(university.is_partner);
}

#[tokio::test]
async fn test_admin_seed_skipped_without_password() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    let results = run_all_seeds(&db, &SeedConfig::default(), false).await.unwrap();
    assert!(results.iter().all(|r| r.is_success()));
    assert_eq!(Admins::find().count(&db).await.unwrap(), 0);
}
