//! The storage capability set consumed by the request handlers.
//!
//! Every method is a direct translation to a single statement; failures come
//! back as the undecorated [`sqlx::Error`] so classification stays at the
//! handler boundary.

use std::future::Future;

use commerce_core::schema::{
    AutomationRule, NewAutomationRule, NewProduct, NewRegion, Product, Region,
};
use commerce_core::types::DbId;

use crate::repositories::{AutomationRuleRepo, ProductRepo, RegionRepo};
use crate::DbPool;

pub type StorageResult<T> = Result<T, sqlx::Error>;

/// Persistence operations the API exposes.
pub trait Storage: Send + Sync {
    fn list_regions(&self) -> impl Future<Output = StorageResult<Vec<Region>>> + Send;

    fn create_region(
        &self,
        region: &NewRegion,
    ) -> impl Future<Output = StorageResult<Region>> + Send;

    /// `None` lists every product.
    fn list_products(
        &self,
        region_id: Option<DbId>,
    ) -> impl Future<Output = StorageResult<Vec<Product>>> + Send;

    fn create_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = StorageResult<Product>> + Send;

    fn list_automation_rules(
        &self,
    ) -> impl Future<Output = StorageResult<Vec<AutomationRule>>> + Send;

    fn create_automation_rule(
        &self,
        rule: &NewAutomationRule,
    ) -> impl Future<Output = StorageResult<AutomationRule>> + Send;

    /// Set `is_active` on a rule. `None` when the id does not exist.
    fn toggle_automation_rule(
        &self,
        id: DbId,
        is_active: bool,
    ) -> impl Future<Output = StorageResult<Option<AutomationRule>>> + Send;
}

/// [`Storage`] backed by the PostgreSQL tables.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Whether the database answers a trivial query.
    pub async fn ping(&self) -> bool {
        match crate::health_check(&self.pool).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Storage ping failed");
                false
            }
        }
    }
}

impl Storage for PgStorage {
    async fn list_regions(&self) -> StorageResult<Vec<Region>> {
        RegionRepo::list(&self.pool).await
    }

    async fn create_region(&self, region: &NewRegion) -> StorageResult<Region> {
        RegionRepo::create(&self.pool, region).await
    }

    async fn list_products(&self, region_id: Option<DbId>) -> StorageResult<Vec<Product>> {
        ProductRepo::list(&self.pool, region_id).await
    }

    async fn create_product(&self, product: &NewProduct) -> StorageResult<Product> {
        ProductRepo::create(&self.pool, product).await
    }

    async fn list_automation_rules(&self) -> StorageResult<Vec<AutomationRule>> {
        AutomationRuleRepo::list(&self.pool).await
    }

    async fn create_automation_rule(
        &self,
        rule: &NewAutomationRule,
    ) -> StorageResult<AutomationRule> {
        AutomationRuleRepo::create(&self.pool, rule).await
    }

    async fn toggle_automation_rule(
        &self,
        id: DbId,
        is_active: bool,
    ) -> StorageResult<Option<AutomationRule>> {
        AutomationRuleRepo::set_active(&self.pool, id, is_active).await
    }
}
