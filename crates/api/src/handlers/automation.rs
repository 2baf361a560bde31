//! Handlers for automation rules.

use axum::extract::{Path, State};
use axum::response::Response;
use commerce_core::contract::{AUTOMATION_CREATE, AUTOMATION_LIST, AUTOMATION_TOGGLE};
use commerce_core::error::CoreError;
use commerce_core::schema::{NewAutomationRule, ToggleAutomationRule, ValidationError};
use commerce_core::types::DbId;
use commerce_db::Storage;

use crate::error::AppResult;
use crate::extract::{contract_input, JsonBody};
use crate::response::respond;
use crate::state::AppState;

/// GET /api/automation-rules
pub async fn list_automation_rules(State(state): State<AppState>) -> AppResult<Response> {
    let rules = state.storage.list_automation_rules().await?;
    respond(&AUTOMATION_LIST, &rules)
}

/// POST /api/automation-rules
pub async fn create_automation_rule(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let input: NewAutomationRule = contract_input(&AUTOMATION_CREATE, &body)?;
    let rule = state.storage.create_automation_rule(&input).await?;

    tracing::info!(
        rule_id = rule.id,
        trigger_event = %rule.trigger_event,
        action_type = %rule.action_type,
        "Automation rule created",
    );

    respond(&AUTOMATION_CREATE, &rule)
}

/// PATCH /api/automation-rules/{id}/toggle
///
/// Sets `isActive` to the value in the body. Responds 404 when the rule does
/// not exist.
pub async fn toggle_automation_rule(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let id: DbId = raw_id
        .parse()
        .map_err(|_| ValidationError::field("id", "id must be an integer"))?;
    let input: ToggleAutomationRule = contract_input(&AUTOMATION_TOGGLE, &body)?;

    let rule = state
        .storage
        .toggle_automation_rule(id, input.is_active)
        .await?
        .ok_or(CoreError::NotFound { entity: "Rule", id })?;

    tracing::info!(rule_id = rule.id, is_active = rule.is_active, "Automation rule toggled");

    respond(&AUTOMATION_TOGGLE, &rule)
}
