//! Handlers for products.

use axum::extract::State;
use axum::response::Response;
use commerce_core::contract::{PRODUCTS_CREATE, PRODUCTS_LIST};
use commerce_core::schema::{NewProduct, ProductFilter};
use commerce_db::Storage;

use crate::error::AppResult;
use crate::extract::{contract_input, JsonBody, QueryParams};
use crate::response::respond;
use crate::state::AppState;

/// GET /api/products?regionId=
///
/// Without `regionId` every product is returned, global ones included.
pub async fn list_products(
    State(state): State<AppState>,
    QueryParams(query): QueryParams,
) -> AppResult<Response> {
    let filter: ProductFilter = contract_input(&PRODUCTS_LIST, &query)?;
    let region_id = filter.region_id()?;
    let products = state.storage.list_products(region_id).await?;
    respond(&PRODUCTS_LIST, &products)
}

/// POST /api/products
///
/// An unknown `regionId` is rejected by the store and surfaces as 409.
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let input: NewProduct = contract_input(&PRODUCTS_CREATE, &body)?;
    let product = state.storage.create_product(&input).await?;

    tracing::info!(
        product_id = product.id,
        shopify_id = %product.shopify_id,
        region_id = ?product.region_id,
        "Product created",
    );

    respond(&PRODUCTS_CREATE, &product)
}
