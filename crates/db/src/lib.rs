//! Persistence layer for the toyshop backend.
//!
//! One SQLite database, one `items` table. Access goes through
//! [`repositories::ItemRepo`]; models live in [`models`].

pub mod models;
pub mod repositories;

use sqlx::sqlite::SqlitePoolOptions;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL.
///
/// Use `?mode=rwc` in the URL so the database file is created on first
/// run, e.g. `sqlite://data/toyshop.db?mode=rwc`.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Cheap liveness probe against the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
