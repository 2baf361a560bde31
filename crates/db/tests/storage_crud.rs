//! Integration tests for the storage layer.
//!
//! Exercises `PgStorage` against a real database:
//! - Create then list for every entity
//! - Store defaults on omitted fields
//! - Unique and foreign key violations
//! - Region filtering of products
//! - Toggle on existing and missing rules

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use commerce_core::schema::{NewAutomationRule, NewProduct, NewRegion};
use commerce_db::{PgStorage, Storage};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_region(code: &str, name: &str) -> NewRegion {
    NewRegion {
        code: code.to_string(),
        name: name.to_string(),
        status: None,
        launch_date: None,
    }
}

fn new_product(shopify_id: &str, region_id: Option<i64>) -> NewProduct {
    NewProduct {
        shopify_id: shopify_id.to_string(),
        title: format!("Product {shopify_id}"),
        handle: format!("product-{shopify_id}"),
        status: None,
        inventory_count: None,
        price: "19.99".to_string(),
        currency: None,
        region_id,
        metadata: None,
    }
}

fn new_rule(name: &str) -> NewAutomationRule {
    NewAutomationRule {
        name: name.to_string(),
        trigger_event: "order.created".to_string(),
        action_type: "notify_team".to_string(),
        is_active: None,
        config: Some(json!({"channel": "#ops"})),
    }
}

fn pg_code(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_region_then_list_returns_it(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let launch = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    let input = NewRegion {
        code: "FR".into(),
        name: "France".into(),
        status: Some("beta".into()),
        launch_date: Some(launch),
    };

    let created = storage.create_region(&input).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.code, "FR");
    assert_eq!(created.status, "beta");
    assert_eq!(created.launch_date, Some(launch));

    let listed = storage.list_regions().await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[sqlx::test(migrations = "./migrations")]
async fn region_status_defaults_to_planned(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let created = storage.create_region(&new_region("FR", "France")).await.unwrap();
    assert_eq!(created.status, "planned");
    assert_eq!(created.launch_date, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_region_code_is_rejected(pool: PgPool) {
    let storage = PgStorage::new(pool);
    storage.create_region(&new_region("US", "United States")).await.unwrap();

    let err = storage
        .create_region(&new_region("US", "Also United States"))
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23505"));

    assert_eq!(storage.list_regions().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn region_ids_are_unique(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let a = storage.create_region(&new_region("US", "United States")).await.unwrap();
    let b = storage.create_region(&new_region("DE", "Germany")).await.unwrap();
    assert_ne!(a.id, b.id);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn product_defaults_are_applied(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let created = storage.create_product(&new_product("sh_1", None)).await.unwrap();
    assert_eq!(created.status, "active");
    assert_eq!(created.inventory_count, 0);
    assert_eq!(created.currency, "USD");
    assert_eq!(created.region_id, None);
    assert_eq!(created.metadata, None);
    assert_eq!(created.price, "19.99");
}

#[sqlx::test(migrations = "./migrations")]
async fn product_metadata_round_trips(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let mut input = new_product("sh_1", None);
    input.metadata = Some(json!({"power": "11kW", "ports": [1, 2]}));
    input.inventory_count = Some(-2);

    let created = storage.create_product(&input).await.unwrap();
    assert_eq!(created.metadata, input.metadata);
    assert_eq!(created.inventory_count, -2);
    assert!(created.is_low_stock());
}

#[sqlx::test(migrations = "./migrations")]
async fn product_with_unknown_region_is_rejected(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let err = storage
        .create_product(&new_product("sh_1", Some(999_999)))
        .await
        .unwrap_err();
    assert_eq!(pg_code(&err).as_deref(), Some("23503"));
    assert!(storage.list_products(None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_products_filters_by_region(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let us = storage.create_region(&new_region("US", "United States")).await.unwrap();
    let de = storage.create_region(&new_region("DE", "Germany")).await.unwrap();

    let p1 = storage.create_product(&new_product("sh_1", Some(us.id))).await.unwrap();
    let p2 = storage.create_product(&new_product("sh_2", Some(de.id))).await.unwrap();
    let p3 = storage.create_product(&new_product("sh_3", Some(us.id))).await.unwrap();
    let global = storage.create_product(&new_product("sh_4", None)).await.unwrap();

    let in_us = storage.list_products(Some(us.id)).await.unwrap();
    assert_eq!(in_us, vec![p1.clone(), p3.clone()]);

    let in_de = storage.list_products(Some(de.id)).await.unwrap();
    assert_eq!(in_de, vec![p2.clone()]);

    let all = storage.list_products(None).await.unwrap();
    assert_eq!(all, vec![p1, p2, p3, global]);

    assert!(storage.list_products(Some(de.id + 100)).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Automation rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn rule_is_active_by_default_and_never_run(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let created = storage.create_automation_rule(&new_rule("Ping ops")).await.unwrap();
    assert!(created.is_active);
    assert_eq!(created.last_run_at, None);
    assert_eq!(created.config, Some(json!({"channel": "#ops"})));
}

#[sqlx::test(migrations = "./migrations")]
async fn toggle_flips_only_is_active(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let created = storage.create_automation_rule(&new_rule("Ping ops")).await.unwrap();

    let updated = storage
        .toggle_automation_rule(created.id, false)
        .await
        .unwrap()
        .expect("rule exists");
    assert!(!updated.is_active);

    let mut expected = created.clone();
    expected.is_active = false;
    assert_eq!(updated, expected);

    let listed = storage.list_automation_rules().await.unwrap();
    assert_eq!(listed, vec![expected]);
}

#[sqlx::test(migrations = "./migrations")]
async fn toggle_missing_rule_returns_none_and_changes_nothing(pool: PgPool) {
    let storage = PgStorage::new(pool);
    let created = storage.create_automation_rule(&new_rule("Ping ops")).await.unwrap();

    let result = storage.toggle_automation_rule(999_999, false).await;
    assert_matches!(result, Ok(None));

    assert_eq!(storage.list_automation_rules().await.unwrap(), vec![created]);
}
