//! Entity schemas.
//!
//! Each entity declares a static field table that describes both its full
//! record shape and its insertable subset (the same table with the
//! system-assigned fields dropped). The tables drive runtime validation of
//! inbound JSON, while the typed structs give compile-time shape checking.
//!
//! Validation is strict about types and lenient about extra keys: a string is
//! never coerced into a number, and unknown keys are ignored.

pub mod automation;
pub mod product;
pub mod region;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use automation::{AutomationRule, NewAutomationRule, ToggleAutomationRule};
pub use product::{NewProduct, Product, ProductFilter};
pub use region::{NewRegion, Region};

// ---------------------------------------------------------------------------
// Validation error
// ---------------------------------------------------------------------------

/// First validation failure found in a payload.
///
/// Serializes to the `{ message, field? }` body the contract declares for
/// HTTP 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ValidationError {
    /// A failure tied to a specific field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// A failure about the payload as a whole.
    pub fn payload(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Field tables
// ---------------------------------------------------------------------------

/// Wire-level type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer (ids and foreign keys).
    BigInteger,
    Boolean,
    /// RFC 3339 string.
    Timestamp,
    /// Any JSON value.
    Json,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer | FieldKind::BigInteger => "an integer",
            FieldKind::Boolean => "a boolean",
            FieldKind::Timestamp => "an RFC 3339 timestamp",
            FieldKind::Json => "a JSON value",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value
                .as_i64()
                .is_some_and(|n| i32::try_from(n).is_ok()),
            FieldKind::BigInteger => value.is_i64(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Timestamp => value
                .as_str()
                .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok()),
            FieldKind::Json => true,
        }
    }
}

/// One field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// camelCase wire name.
    pub name: &'static str,
    pub kind: FieldKind,
    /// Whether `null` is a legal stored value.
    pub nullable: bool,
    /// Whether the store fills the field when an insert omits it.
    pub has_default: bool,
    /// Assigned by the system; never part of the insertable shape.
    pub system: bool,
}

impl FieldSpec {
    /// Non-null field the client must supply.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            has_default: false,
            system: false,
        }
    }

    /// Nullable field the client may omit.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
            has_default: false,
            system: false,
        }
    }

    /// Non-null field with a store-side default.
    pub const fn defaulted(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            has_default: true,
            system: false,
        }
    }

    /// System-assigned field.
    pub const fn system(name: &'static str, kind: FieldKind, nullable: bool) -> Self {
        Self {
            name,
            kind,
            nullable,
            has_default: true,
            system: true,
        }
    }

    /// Whether an insert payload must carry this field.
    pub fn required_on_insert(&self) -> bool {
        !self.system && !self.nullable && !self.has_default
    }
}

/// The three entities the contract knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Region,
    Product,
    AutomationRule,
}

impl EntityKind {
    /// Display name used in messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Region => "Region",
            EntityKind::Product => "Product",
            EntityKind::AutomationRule => "AutomationRule",
        }
    }

    /// Full record shape.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Region => region::FIELDS,
            EntityKind::Product => product::FIELDS,
            EntityKind::AutomationRule => automation::FIELDS,
        }
    }

    /// Insertable shape: the record shape minus system-assigned fields.
    pub fn insert_fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields().iter().filter(|f| !f.system)
    }

    /// Check an insert payload against the insertable shape.
    pub fn check_insert(self, value: &Value) -> Result<(), ValidationError> {
        let object = as_object(value)?;
        for field in self.insert_fields() {
            match object.get(field.name) {
                None | Some(Value::Null) if field.required_on_insert() => {
                    return Err(ValidationError::field(
                        field.name,
                        format!("{} is required", field.name),
                    ));
                }
                None => {}
                Some(Value::Null) if field.nullable => {}
                Some(v) => check_kind(field, v)?,
            }
        }
        Ok(())
    }

    /// Check a full record (e.g. a response body) against the record shape.
    ///
    /// Every field must be present; system-assigned ids must have their
    /// declared type.
    pub fn check_record(self, value: &Value) -> Result<(), ValidationError> {
        let object = as_object(value)?;
        for field in self.fields() {
            match object.get(field.name) {
                None => {
                    return Err(ValidationError::field(
                        field.name,
                        format!("{} is missing from {}", field.name, self.name()),
                    ));
                }
                Some(Value::Null) if field.nullable => {}
                Some(v) => check_kind(field, v)?,
            }
        }
        Ok(())
    }

    /// Check a JSON array whose every element is a full record.
    pub fn check_record_list(self, value: &Value) -> Result<(), ValidationError> {
        let items = value.as_array().ok_or_else(|| {
            ValidationError::payload(format!("expected an array of {}", self.name()))
        })?;
        items.iter().try_for_each(|item| self.check_record(item))
    }
}

fn as_object(value: &Value) -> Result<&serde_json::Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::payload("request body must be a JSON object"))
}

fn check_kind(field: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    if field.kind.accepts(value) {
        Ok(())
    } else {
        Err(ValidationError::field(
            field.name,
            format!("{} must be {}", field.name, field.kind.describe()),
        ))
    }
}

// ---------------------------------------------------------------------------
// Typed schemas
// ---------------------------------------------------------------------------

/// Binds a record type to its field table and insertable counterpart.
pub trait EntitySchema: Serialize + DeserializeOwned {
    /// The creatable shape.
    type Insert: Serialize + DeserializeOwned;

    const KIND: EntityKind;

    /// Describe the full record.
    fn record_fields() -> &'static [FieldSpec] {
        Self::KIND.fields()
    }

    /// Describe a creatable record.
    fn insert_fields() -> impl Iterator<Item = &'static FieldSpec> {
        Self::KIND.insert_fields()
    }

    /// Validate and decode an insert payload.
    fn parse_insert(value: &Value) -> Result<Self::Insert, ValidationError> {
        Self::KIND.check_insert(value)?;
        decode(Self::KIND, value)
    }

    /// Validate and decode a full record.
    fn parse_record(value: &Value) -> Result<Self, ValidationError> {
        Self::KIND.check_record(value)?;
        decode(Self::KIND, value)
    }

    /// Validate and decode a list of full records.
    fn parse_record_list(value: &Value) -> Result<Vec<Self>, ValidationError> {
        Self::KIND.check_record_list(value)?;
        decode(Self::KIND, value)
    }
}

fn decode<T: DeserializeOwned>(kind: EntityKind, value: &Value) -> Result<T, ValidationError> {
    T::deserialize(value)
        .map_err(|e| ValidationError::payload(format!("invalid {} payload: {e}", kind.name())))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
