//! Handlers for regions.

use axum::extract::State;
use axum::response::Response;
use commerce_core::contract::{REGIONS_CREATE, REGIONS_LIST};
use commerce_core::schema::NewRegion;
use commerce_db::Storage;

use crate::error::AppResult;
use crate::extract::{contract_input, JsonBody};
use crate::response::respond;
use crate::state::AppState;

/// GET /api/regions
pub async fn list_regions(State(state): State<AppState>) -> AppResult<Response> {
    let regions = state.storage.list_regions().await?;
    respond(&REGIONS_LIST, &regions)
}

/// POST /api/regions
///
/// A duplicate `code` is rejected by the store and surfaces as 409.
pub async fn create_region(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let input: NewRegion = contract_input(&REGIONS_CREATE, &body)?;
    let region = state.storage.create_region(&input).await?;

    tracing::info!(region_id = region.id, code = %region.code, "Region created");

    respond(&REGIONS_CREATE, &region)
}
