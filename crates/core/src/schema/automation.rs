//! Automation rules.
//!
//! Rules are configuration rows only: they are created and switched on or off,
//! but nothing evaluates triggers or dispatches actions. `lastRunAt` is carried
//! in the shape and never written.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{as_object, check_kind, EntityKind, EntitySchema, FieldKind, FieldSpec, ValidationError};
use crate::types::{DbId, JsonDocument, Timestamp};

/// Trigger events the admin UI offers. The API accepts any string.
pub const TRIGGER_EVENTS: &[&str] = &["order.created", "inventory.low", "product.updated"];

/// Action identifiers the admin UI offers. The API accepts any string.
pub const ACTION_TYPES: &[&str] = &["notify_team", "auto_restock", "sync_shopify"];

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::system("id", FieldKind::BigInteger, false),
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::required("triggerEvent", FieldKind::Text),
    FieldSpec::required("actionType", FieldKind::Text),
    FieldSpec::defaulted("isActive", FieldKind::Boolean),
    FieldSpec::optional("config", FieldKind::Json),
    FieldSpec::system("lastRunAt", FieldKind::Timestamp, true),
];

const TOGGLE_FIELD: FieldSpec = FieldSpec::required("isActive", FieldKind::Boolean);

/// A row from the `automation_rules` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct AutomationRule {
    pub id: DbId,
    pub name: String,
    /// Dot-namespaced event name, e.g. `inventory.low`.
    pub trigger_event: String,
    pub action_type: String,
    pub is_active: bool,
    /// Interpretation depends on `action_type`.
    pub config: Option<JsonDocument>,
    pub last_run_at: Option<Timestamp>,
}

/// Insertable rule. `isActive` falls back to `true` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAutomationRule {
    pub name: String,
    pub trigger_event: String,
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JsonDocument>,
}

impl EntitySchema for AutomationRule {
    type Insert = NewAutomationRule;

    const KIND: EntityKind = EntityKind::AutomationRule;
}

/// Body of the toggle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAutomationRule {
    pub is_active: bool,
}

impl ToggleAutomationRule {
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        let object = as_object(value)?;
        match object.get(TOGGLE_FIELD.name) {
            None | Some(Value::Null) => Err(ValidationError::field(
                TOGGLE_FIELD.name,
                "isActive is required",
            )),
            Some(v) => {
                check_kind(&TOGGLE_FIELD, v)?;
                Ok(Self {
                    is_active: v.as_bool().unwrap_or_default(),
                })
            }
        }
    }
}
