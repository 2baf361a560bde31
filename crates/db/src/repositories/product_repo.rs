//! Repository for the `products` table.

use commerce_core::schema::{NewProduct, Product};
use commerce_core::types::DbId;
use sqlx::PgPool;

const COLUMNS: &str = "id, shopify_id, title, handle, status, inventory_count, price, \
                       currency, region_id, metadata";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// Omitted `status`, `inventory_count` and `currency` fall back to
    /// `active`, `0` and `USD`. An unknown `region_id` fails on
    /// `fk_products_region_id`.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (shopify_id, title, handle, status, inventory_count, price, currency, region_id, metadata)
             VALUES ($1, $2, $3, COALESCE($4, 'active'), COALESCE($5, 0), $6, COALESCE($7, 'USD'), $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.shopify_id)
            .bind(&input.title)
            .bind(&input.handle)
            .bind(&input.status)
            .bind(input.inventory_count)
            .bind(&input.price)
            .bind(&input.currency)
            .bind(input.region_id)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// List products, optionally restricted to one region.
    ///
    /// `None` returns every product, global ones included.
    pub async fn list(pool: &PgPool, region_id: Option<DbId>) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::BIGINT IS NULL OR region_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(region_id)
            .fetch_all(pool)
            .await
    }
}
