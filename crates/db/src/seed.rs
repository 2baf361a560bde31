//! First-boot demo data.
//!
//! Fires only when the regions table is empty. It is not a migration
//! mechanism: once any region exists the seed never runs again, even if the
//! products or rules it would have added are missing.

use chrono::Utc;
use commerce_core::schema::region::{STATUS_BETA, STATUS_LIVE, STATUS_PLANNED};
use commerce_core::schema::{NewAutomationRule, NewProduct, NewRegion};
use serde_json::json;

use crate::storage::{Storage, StorageResult};

/// What a seed pass inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub regions: usize,
    pub products: usize,
    pub automation_rules: usize,
}

/// Insert the demo regions, products and automation rules if no region exists.
///
/// Returns `None` when the store already had regions.
pub async fn seed_if_empty<S: Storage>(storage: &S) -> StorageResult<Option<SeedSummary>> {
    if !storage.list_regions().await?.is_empty() {
        tracing::debug!("Regions present, skipping seed");
        return Ok(None);
    }

    let now = Utc::now();
    let us = storage
        .create_region(&NewRegion {
            code: "US".into(),
            name: "United States".into(),
            status: Some(STATUS_LIVE.into()),
            launch_date: Some(now),
        })
        .await?;
    let de = storage
        .create_region(&NewRegion {
            code: "DE".into(),
            name: "Germany".into(),
            status: Some(STATUS_BETA.into()),
            launch_date: Some(now),
        })
        .await?;
    storage
        .create_region(&NewRegion {
            code: "CN".into(),
            name: "China".into(),
            status: Some(STATUS_PLANNED.into()),
            launch_date: None,
        })
        .await?;

    let products = [
        NewProduct {
            shopify_id: "sh_101".into(),
            title: "2025 Escalade IQ Model".into(),
            handle: "escalade-iq-2025".into(),
            status: Some("active".into()),
            inventory_count: Some(50),
            price: "130000".into(),
            currency: Some("USD".into()),
            region_id: Some(us.id),
            metadata: Some(json!({"vin_series": "E100"})),
        },
        NewProduct {
            shopify_id: "sh_102".into(),
            title: "Lyriq Home Charger".into(),
            handle: "lyriq-charger".into(),
            status: Some("active".into()),
            inventory_count: Some(200),
            price: "599".into(),
            currency: Some("EUR".into()),
            region_id: Some(de.id),
            metadata: Some(json!({"power": "11kW"})),
        },
    ];
    for product in &products {
        storage.create_product(product).await?;
    }

    let rules = [
        NewAutomationRule {
            name: "Restock High Demand Items".into(),
            trigger_event: "inventory.low".into(),
            action_type: "auto_restock".into(),
            is_active: Some(true),
            config: Some(json!({"threshold": 10, "amount": 50})),
        },
        NewAutomationRule {
            name: "Notify Region Manager on Launch".into(),
            trigger_event: "region.status_change".into(),
            action_type: "notify_team".into(),
            is_active: Some(true),
            config: Some(json!({"role": "regional_manager"})),
        },
    ];
    for rule in &rules {
        storage.create_automation_rule(rule).await?;
    }

    let summary = SeedSummary {
        regions: 3,
        products: products.len(),
        automation_rules: rules.len(),
    };
    tracing::info!(
        regions = summary.regions,
        products = summary.products,
        automation_rules = summary.automation_rules,
        "Seeded empty database",
    );
    Ok(Some(summary))
}
