//! Route contract registry.
//!
//! One static table maps every API operation to its HTTP method, path
//! template, input schema and the schema of each response status it may
//! produce. The server mounts its routes from this table and checks inbound
//! bodies against it; the client builds requests from it and checks what comes
//! back.
//!
//! ```text
//! regions     list    GET    /api/regions                       -> 200 [Region]
//! regions     create  POST   /api/regions                       -> 201 Region | 400
//! products    list    GET    /api/products?regionId=            -> 200 [Product] | 400
//! products    create  POST   /api/products                      -> 201 Product | 400
//! automation  list    GET    /api/automation-rules              -> 200 [AutomationRule]
//! automation  create  POST   /api/automation-rules              -> 201 AutomationRule | 400
//! automation  toggle  PATCH  /api/automation-rules/:id/toggle   -> 200 AutomationRule | 400 | 404
//! ```

pub mod path;

use std::fmt;

use serde_json::Value;

use crate::schema::{EntityKind, ProductFilter, ToggleAutomationRule, ValidationError};

pub use path::{build_url, router_path};

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Regions,
    Products,
    Automation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Toggle,
}

/// What an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSchema {
    /// JSON body in the entity's insertable shape.
    Insert(EntityKind),
    /// Query string with an optional `regionId`.
    ProductFilter,
    /// JSON body `{ "isActive": boolean }`.
    Toggle,
}

/// What a response body for one status looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    Record(EntityKind),
    RecordList(EntityKind),
    /// `{ message, field? }`
    ValidationError,
    /// `{ message }`
    NotFound,
}

/// Message the toggle operation returns with its 404.
pub const RULE_NOT_FOUND: &str = "Rule not found";

/// A mismatch between a payload and the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("{method} {path} does not declare a {status} response")]
    UndeclaredStatus {
        method: Method,
        path: &'static str,
        status: u16,
    },

    #[error("{method} {path} returned a {status} body that breaks its schema: {source}")]
    Body {
        method: Method,
        path: &'static str,
        status: u16,
        #[source]
        source: ValidationError,
    },
}

// ---------------------------------------------------------------------------
// Route contract
// ---------------------------------------------------------------------------

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContract {
    pub resource: Resource,
    pub operation: Operation,
    pub method: Method,
    /// Path template with `:name` placeholders.
    pub path: &'static str,
    /// `None` for plain list operations.
    pub input: Option<InputSchema>,
    /// Declared status codes, success first.
    pub responses: &'static [(u16, ResponseSchema)],
}

impl RouteContract {
    /// The status a successful call answers with.
    pub fn success_status(&self) -> u16 {
        self.responses
            .iter()
            .map(|(status, _)| *status)
            .find(|status| (200..300).contains(status))
            .unwrap_or(200)
    }

    /// Schema declared for `status`, if any.
    pub fn response_schema(&self, status: u16) -> Option<ResponseSchema> {
        self.responses
            .iter()
            .find(|(declared, _)| *declared == status)
            .map(|(_, schema)| *schema)
    }

    /// Concrete URL path for this route.
    ///
    /// # Panics
    ///
    /// Panics if the template has a placeholder missing from `params`.
    pub fn url(&self, params: &[(&str, String)]) -> String {
        build_url(self.path, params)
    }

    /// The path template in axum's capture syntax.
    pub fn router_path(&self) -> String {
        router_path(self.path)
    }

    /// Check an inbound payload. For [`InputSchema::ProductFilter`] the payload
    /// is the query string rendered as a JSON object.
    pub fn validate_input(&self, value: &Value) -> Result<(), ValidationError> {
        match self.input {
            None => Ok(()),
            Some(InputSchema::Insert(kind)) => kind.check_insert(value),
            Some(InputSchema::ProductFilter) => {
                let filter: ProductFilter = match value {
                    Value::Null => ProductFilter::default(),
                    _ => serde_json::from_value(value.clone()).map_err(|_| {
                        ValidationError::field("regionId", "regionId must be a string")
                    })?,
                };
                filter.region_id().map(|_| ())
            }
            Some(InputSchema::Toggle) => ToggleAutomationRule::parse(value).map(|_| ()),
        }
    }

    /// Check a response body against the schema declared for `status`.
    pub fn validate_response(&self, status: u16, body: &Value) -> Result<(), ContractError> {
        let schema = self
            .response_schema(status)
            .ok_or(ContractError::UndeclaredStatus {
                method: self.method,
                path: self.path,
                status,
            })?;

        let checked = match schema {
            ResponseSchema::Record(kind) => kind.check_record(body),
            ResponseSchema::RecordList(kind) => kind.check_record_list(body),
            ResponseSchema::ValidationError => check_error_body(body, true),
            ResponseSchema::NotFound => check_error_body(body, false),
        };

        checked.map_err(|source| ContractError::Body {
            method: self.method,
            path: self.path,
            status,
            source,
        })
    }
}

fn check_error_body(body: &Value, allow_field: bool) -> Result<(), ValidationError> {
    let object = body
        .as_object()
        .ok_or_else(|| ValidationError::payload("error body must be a JSON object"))?;
    if !object.get("message").is_some_and(Value::is_string) {
        return Err(ValidationError::field("message", "message must be a string"));
    }
    if allow_field {
        match object.get("field") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => return Err(ValidationError::field("field", "field must be a string")),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub const REGIONS_LIST: RouteContract = RouteContract {
    resource: Resource::Regions,
    operation: Operation::List,
    method: Method::Get,
    path: "/api/regions",
    input: None,
    responses: &[(200, ResponseSchema::RecordList(EntityKind::Region))],
};

pub const REGIONS_CREATE: RouteContract = RouteContract {
    resource: Resource::Regions,
    operation: Operation::Create,
    method: Method::Post,
    path: "/api/regions",
    input: Some(InputSchema::Insert(EntityKind::Region)),
    responses: &[
        (201, ResponseSchema::Record(EntityKind::Region)),
        (400, ResponseSchema::ValidationError),
    ],
};

pub const PRODUCTS_LIST: RouteContract = RouteContract {
    resource: Resource::Products,
    operation: Operation::List,
    method: Method::Get,
    path: "/api/products",
    input: Some(InputSchema::ProductFilter),
    responses: &[
        (200, ResponseSchema::RecordList(EntityKind::Product)),
        (400, ResponseSchema::ValidationError),
    ],
};

pub const PRODUCTS_CREATE: RouteContract = RouteContract {
    resource: Resource::Products,
    operation: Operation::Create,
    method: Method::Post,
    path: "/api/products",
    input: Some(InputSchema::Insert(EntityKind::Product)),
    responses: &[
        (201, ResponseSchema::Record(EntityKind::Product)),
        (400, ResponseSchema::ValidationError),
    ],
};

pub const AUTOMATION_LIST: RouteContract = RouteContract {
    resource: Resource::Automation,
    operation: Operation::List,
    method: Method::Get,
    path: "/api/automation-rules",
    input: None,
    responses: &[(200, ResponseSchema::RecordList(EntityKind::AutomationRule))],
};

pub const AUTOMATION_CREATE: RouteContract = RouteContract {
    resource: Resource::Automation,
    operation: Operation::Create,
    method: Method::Post,
    path: "/api/automation-rules",
    input: Some(InputSchema::Insert(EntityKind::AutomationRule)),
    responses: &[
        (201, ResponseSchema::Record(EntityKind::AutomationRule)),
        (400, ResponseSchema::ValidationError),
    ],
};

pub const AUTOMATION_TOGGLE: RouteContract = RouteContract {
    resource: Resource::Automation,
    operation: Operation::Toggle,
    method: Method::Patch,
    path: "/api/automation-rules/:id/toggle",
    input: Some(InputSchema::Toggle),
    responses: &[
        (200, ResponseSchema::Record(EntityKind::AutomationRule)),
        (400, ResponseSchema::ValidationError),
        (404, ResponseSchema::NotFound),
    ],
};

/// Every registered operation.
pub static ROUTES: &[&RouteContract] = &[
    &REGIONS_LIST,
    &REGIONS_CREATE,
    &PRODUCTS_LIST,
    &PRODUCTS_CREATE,
    &AUTOMATION_LIST,
    &AUTOMATION_CREATE,
    &AUTOMATION_TOGGLE,
];

/// Look up the entry for `resource` / `operation`.
pub fn find(resource: Resource, operation: Operation) -> Option<&'static RouteContract> {
    ROUTES
        .iter()
        .copied()
        .find(|route| route.resource == resource && route.operation == operation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
