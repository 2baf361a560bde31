//! [`ApiClient`]: one accessor per registry operation.

use commerce_core::contract::{
    self, Method, Operation, RouteContract, AUTOMATION_CREATE, AUTOMATION_LIST, AUTOMATION_TOGGLE,
    PRODUCTS_CREATE, PRODUCTS_LIST, REGIONS_CREATE, REGIONS_LIST,
};
use commerce_core::schema::{
    AutomationRule, EntitySchema, NewAutomationRule, NewProduct, NewRegion, Product,
    ProductFilter, Region, ToggleAutomationRule, ValidationError,
};
use commerce_core::types::DbId;
use serde::Serialize;
use serde_json::Value;

use crate::cache::{QueryCache, QueryKey};
use crate::dashboard::DashboardSummary;
use crate::error::{ClientError, ClientResult};

/// HTTP client for a commerce API server.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: QueryCache,
}

impl ApiClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            cache: QueryCache::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ---- reads ----

    pub async fn regions(&self) -> ClientResult<Vec<Region>> {
        self.fetch_list(&REGIONS_LIST, QueryKey::new(REGIONS_LIST.path))
            .await
    }

    /// Products, optionally only those assigned to `region_id`.
    pub async fn products(&self, region_id: Option<DbId>) -> ClientResult<Vec<Product>> {
        let filter = region_id.map(ProductFilter::for_region).unwrap_or_default();
        PRODUCTS_LIST.validate_input(&serde_json::to_value(&filter)?)?;

        let mut key = QueryKey::new(PRODUCTS_LIST.path);
        if let Some(raw) = filter.region_id {
            key = key.with_param("regionId", raw);
        }
        self.fetch_list(&PRODUCTS_LIST, key).await
    }

    pub async fn automation_rules(&self) -> ClientResult<Vec<AutomationRule>> {
        self.fetch_list(&AUTOMATION_LIST, QueryKey::new(AUTOMATION_LIST.path))
            .await
    }

    /// Headline counts for the dashboard, computed from the three lists.
    pub async fn dashboard(&self) -> ClientResult<DashboardSummary> {
        let (regions, products, rules) =
            tokio::try_join!(self.regions(), self.products(None), self.automation_rules())?;
        Ok(DashboardSummary::from_lists(&regions, &products, &rules))
    }

    // ---- writes ----

    pub async fn create_region(&self, input: &NewRegion) -> ClientResult<Region> {
        self.mutate(&REGIONS_CREATE, &[], input).await
    }

    pub async fn create_product(&self, input: &NewProduct) -> ClientResult<Product> {
        self.mutate(&PRODUCTS_CREATE, &[], input).await
    }

    pub async fn create_automation_rule(
        &self,
        input: &NewAutomationRule,
    ) -> ClientResult<AutomationRule> {
        self.mutate(&AUTOMATION_CREATE, &[], input).await
    }

    /// Set a rule's `isActive` flag. A missing rule yields
    /// [`ClientError::NotFound`].
    pub async fn toggle_automation_rule(
        &self,
        id: DbId,
        is_active: bool,
    ) -> ClientResult<AutomationRule> {
        self.mutate(
            &AUTOMATION_TOGGLE,
            &[("id", id.to_string())],
            &ToggleAutomationRule { is_active },
        )
        .await
    }

    // ---- private helpers ----

    async fn fetch_list<T: EntitySchema>(
        &self,
        contract: &RouteContract,
        key: QueryKey,
    ) -> ClientResult<Vec<T>> {
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(path = key.path, "Serving cached list");
            return T::parse_record_list(&cached).map_err(decode_error);
        }

        let generation = self.cache.generation(key.path).await;
        let request = self
            .http
            .request(http_method(contract.method), self.url(contract, &[]))
            .query(&key.params);
        let body = self.execute(contract, request).await?;

        let records = T::parse_record_list(&body).map_err(decode_error)?;
        if !self.cache.insert_if_current(key, body, generation).await {
            tracing::debug!(path = contract.path, "List changed while in flight, not caching");
        }
        Ok(records)
    }

    async fn mutate<T: EntitySchema>(
        &self,
        contract: &RouteContract,
        params: &[(&str, String)],
        input: &impl Serialize,
    ) -> ClientResult<T> {
        let payload = serde_json::to_value(input)?;
        contract.validate_input(&payload)?;

        let request = self
            .http
            .request(http_method(contract.method), self.url(contract, params))
            .json(&payload);
        let body = self.execute(contract, request).await?;
        let record = T::parse_record(&body).map_err(decode_error)?;

        if let Some(list) = contract::find(contract.resource, Operation::List) {
            let dropped = self.cache.invalidate(list.path).await;
            tracing::debug!(path = list.path, dropped, "Invalidated cached lists");
        }
        Ok(record)
    }

    /// Send `request` and check the answer against `contract`.
    ///
    /// Success bodies must match the declared schema. 400 and 404 map to
    /// their dedicated variants; any other status is
    /// [`ClientError::Unexpected`].
    async fn execute(
        &self,
        contract: &RouteContract,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<Value> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        if (200..300).contains(&status) {
            let body: Value = serde_json::from_slice(&bytes)?;
            contract.validate_response(status, &body)?;
            return Ok(body);
        }

        let text = String::from_utf8_lossy(&bytes).into_owned();
        tracing::warn!(
            method = %contract.method,
            path = contract.path,
            status,
            "Request failed",
        );

        let error_body = serde_json::from_slice::<Value>(&bytes).ok().and_then(|body| {
            if contract.response_schema(status).is_some()
                && contract.validate_response(status, &body).is_err()
            {
                return None;
            }
            serde_json::from_value::<ValidationError>(body).ok()
        });

        match (status, error_body) {
            (400, Some(err)) => Err(err.into()),
            (404, Some(err)) => Err(ClientError::NotFound(err.message)),
            (404, None) => Err(ClientError::NotFound(text)),
            _ => Err(ClientError::Unexpected { status, body: text }),
        }
    }

    fn url(&self, contract: &RouteContract, params: &[(&str, String)]) -> String {
        format!("{}{}", self.base_url, contract.url(params))
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
    }
}

fn decode_error(err: ValidationError) -> ClientError {
    ClientError::Decode(err.message)
}
