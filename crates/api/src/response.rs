//! Contract-checked responses.
//!
//! Handlers hand their result to [`respond`] instead of wrapping it in `Json`
//! directly: the body is serialized once, checked against the schema the
//! registry declares for the route's success status, and only then sent.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use commerce_core::contract::RouteContract;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Serialize `body` as the success response of `contract`.
///
/// A body that breaks the declared schema is a server bug and surfaces as a
/// 500 rather than reaching the client.
pub fn respond<T: Serialize>(contract: &RouteContract, body: &T) -> AppResult<Response> {
    let status = contract.success_status();
    let value = serde_json::to_value(body)
        .map_err(|e| AppError::InternalError(format!("failed to serialize response: {e}")))?;

    contract
        .validate_response(status, &value)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    Ok((status, Json(value)).into_response())
}
