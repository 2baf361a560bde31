//! Storage layer for the commerce admin API.
//!
//! Repositories issue one SQL statement per call against PostgreSQL. The
//! [`Storage`] trait bundles them into the capability set the request
//! handlers depend on.

use sqlx::postgres::PgPoolOptions;

pub mod repositories;
pub mod seed;
pub mod storage;

pub use storage::{PgStorage, Storage};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
