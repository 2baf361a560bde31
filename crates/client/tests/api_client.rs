//! End-to-end tests: the client against the real router on an ephemeral port.

use std::net::SocketAddr;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;
use tokio::task::JoinHandle;

use commerce_api::config::ServerConfig;
use commerce_api::router::build_app_router;
use commerce_api::state::AppState;
use commerce_client::{ApiClient, ClientError, QueryKey};
use commerce_core::contract::{AUTOMATION_LIST, PRODUCTS_LIST, REGIONS_LIST, RULE_NOT_FOUND};
use commerce_core::schema::{NewAutomationRule, NewProduct, NewRegion};
use commerce_db::PgStorage;

struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
    pool: PgPool,
}

impl TestServer {
    async fn start(pool: PgPool) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            seed_on_boot: false,
        };
        let app = build_app_router(AppState::new(pool.clone(), config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, handle, pool }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(format!("http://{}", self.addr))
    }

    async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
        self.pool.close().await;
    }
}

fn new_region(code: &str, status: Option<&str>) -> NewRegion {
    NewRegion {
        code: code.to_string(),
        name: format!("Region {code}"),
        status: status.map(str::to_string),
        launch_date: None,
    }
}

fn new_product(shopify_id: &str, region_id: Option<i64>) -> NewProduct {
    NewProduct {
        shopify_id: shopify_id.to_string(),
        title: format!("Product {shopify_id}"),
        handle: format!("product-{shopify_id}"),
        status: None,
        inventory_count: Some(5),
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
        action_type: "email".to_string(),
        is_active: None,
        config: Some(json!({"to": "ops@example.com"})),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_region_invalidates_cached_list(pool: PgPool) {
    let server = TestServer::start(pool).await;
    let client = server.client();

    assert!(client.regions().await.unwrap().is_empty());
    assert!(client.cache().contains(&QueryKey::new(REGIONS_LIST.path)).await);

    let launch = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let mut input = new_region("FR", Some("planned"));
    input.launch_date = Some(launch);
    let created = client.create_region(&input).await.unwrap();
    assert_eq!(created.status, "planned");
    assert_eq!(created.launch_date, Some(launch));
    assert!(!client.cache().contains(&QueryKey::new(REGIONS_LIST.path)).await);

    let regions = client.regions().await.unwrap();
    assert_eq!(regions, vec![created]);

    server.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn product_filter_is_part_of_the_query_key(pool: PgPool) {
    let server = TestServer::start(pool).await;
    let client = server.client();

    let us = client.create_region(&new_region("US", None)).await.unwrap();
    let de = client.create_region(&new_region("DE", None)).await.unwrap();
    let in_us = client.create_product(&new_product("sh_1", Some(us.id))).await.unwrap();
    client.create_product(&new_product("sh_2", Some(de.id))).await.unwrap();
    client.create_product(&new_product("sh_3", None)).await.unwrap();

    let filtered = client.products(Some(us.id)).await.unwrap();
    assert_eq!(filtered, vec![in_us.clone()]);
    assert_eq!(filtered[0].currency, "USD");
    assert_eq!(client.products(None).await.unwrap().len(), 3);

    let filtered_key = QueryKey::new(PRODUCTS_LIST.path).with_param("regionId", us.id.to_string());
    assert!(client.cache().contains(&filtered_key).await);
    assert!(client.cache().contains(&QueryKey::new(PRODUCTS_LIST.path)).await);

    client.create_product(&new_product("sh_4", Some(us.id))).await.unwrap();
    assert!(!client.cache().contains(&filtered_key).await);
    assert!(!client.cache().contains(&QueryKey::new(PRODUCTS_LIST.path)).await);
    assert_eq!(client.products(Some(us.id)).await.unwrap().len(), 2);

    server.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn toggle_returns_updated_rule(pool: PgPool) {
    let server = TestServer::start(pool).await;
    let client = server.client();

    let rule = client.create_automation_rule(&new_rule("Order email")).await.unwrap();
    assert!(rule.is_active);
    client.automation_rules().await.unwrap();

    let toggled = client.toggle_automation_rule(rule.id, false).await.unwrap();
    assert!(!toggled.is_active);
    assert_eq!(toggled.name, rule.name);
    assert_eq!(toggled.config, rule.config);
    assert!(!client.cache().contains(&QueryKey::new(AUTOMATION_LIST.path)).await);

    let rules = client.automation_rules().await.unwrap();
    assert_eq!(rules, vec![toggled]);

    server.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn toggle_missing_rule_is_not_found(pool: PgPool) {
    let server = TestServer::start(pool).await;
    let client = server.client();

    let err = client.toggle_automation_rule(999_999, true).await.unwrap_err();
    assert_matches!(err, ClientError::NotFound(message) if message == RULE_NOT_FOUND);

    server.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_region_surfaces_status(pool: PgPool) {
    let server = TestServer::start(pool).await;
    let client = server.client();

    client.create_region(&new_region("US", None)).await.unwrap();
    let err = client.create_region(&new_region("US", None)).await.unwrap_err();
    assert_matches!(err, ClientError::Unexpected { status: 409, .. });

    server.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_reflects_seed_and_toggles(pool: PgPool) {
    commerce_db::seed::seed_if_empty(&PgStorage::new(pool.clone()))
        .await
        .unwrap();
    let server = TestServer::start(pool).await;
    let client = server.client();

    let summary = client.dashboard().await.unwrap();
    assert_eq!(summary.total_products, 2);
    assert_eq!(summary.active_automations, 2);
    assert_eq!(summary.live_regions, 1);
    assert_eq!(summary.low_stock_products, 0);

    let rules = client.automation_rules().await.unwrap();
    client.toggle_automation_rule(rules[0].id, false).await.unwrap();
    assert_eq!(client.dashboard().await.unwrap().active_automations, 1);

    server.stop().await;
}
