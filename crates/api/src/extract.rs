//! Request extractors that validate against the route contract.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use commerce_core::contract::RouteContract;
use commerce_core::schema::ValidationError;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Raw JSON body.
///
/// Like `Json<Value>`, but a missing content type or malformed JSON is
/// reported through [`AppError`] so every 400 shares one envelope.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S: Send + Sync> FromRequest<S> for JsonBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string as a JSON object of string values.
///
/// Malformed encoding becomes a 400 in the shared envelope; a key given more
/// than once is a validation error on that key.
#[derive(Debug)]
pub struct QueryParams(pub Value);

impl<S: Send + Sync> FromRequestParts<S> for QueryParams {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        let mut object = serde_json::Map::new();
        for (key, value) in pairs {
            if object.contains_key(&key) {
                let message = format!("{key} must be given once");
                return Err(ValidationError::field(&key, message).into());
            }
            object.insert(key, Value::String(value));
        }
        Ok(Self(Value::Object(object)))
    }
}

/// Validate `value` against the input schema of `contract`, then decode it.
///
/// The registry check runs first so the error names the offending field;
/// decoding after a passing check only fails on a schema/type mismatch, which
/// is reported as a payload-level validation error.
pub fn contract_input<T: DeserializeOwned>(contract: &RouteContract, value: &Value) -> AppResult<T> {
    contract.validate_input(value)?;
    T::deserialize(value).map_err(|e| {
        AppError::from(ValidationError::payload(format!(
            "invalid request body: {e}"
        )))
    })
}
