//! Repository for the `regions` table.

use commerce_core::schema::{NewRegion, Region};
use sqlx::PgPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, status, launch_date";

/// Provides CRUD operations for regions.
pub struct RegionRepo;

impl RegionRepo {
    /// Insert a new region, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `planned`. A duplicate
    /// `code` fails on `uq_regions_code`.
    pub async fn create(pool: &PgPool, input: &NewRegion) -> Result<Region, sqlx::Error> {
        let query = format!(
            "INSERT INTO regions (code, name, status, launch_date)
             VALUES ($1, $2, COALESCE($3, 'planned'), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.status)
            .bind(input.launch_date)
            .fetch_one(pool)
            .await
    }

    /// List all regions in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions ORDER BY id");
        sqlx::query_as::<_, Region>(&query).fetch_all(pool).await
    }
}
