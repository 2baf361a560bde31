//! Liveness report at `GET /health`, outside the contract registry.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use commerce_core::contract::ROUTES;
use serde::Serialize;

use crate::routes::endpoint;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when storage answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// `up` or `down`.
    pub database: &'static str,
    /// Registry entries with a mounted handler.
    pub routes: usize,
}

impl HealthReport {
    fn new(database_up: bool) -> Self {
        let (status, database) = if database_up {
            ("ok", "up")
        } else {
            ("degraded", "down")
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            routes: ROUTES.iter().filter(|c| endpoint(c).is_some()).count(),
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::new(state.storage.ping().await))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
