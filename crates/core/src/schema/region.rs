//! Region: a market the storefront rolls out to.

use serde::{Deserialize, Serialize};

use super::{EntityKind, EntitySchema, FieldKind, FieldSpec};
use crate::types::{DbId, Timestamp};

/// Region not yet launched. Default for new regions.
pub const STATUS_PLANNED: &str = "planned";
/// Region open to a limited audience.
pub const STATUS_BETA: &str = "beta";
/// Region fully launched.
pub const STATUS_LIVE: &str = "live";

/// Status values the admin UI offers. The API accepts any string.
pub const REGION_STATUSES: &[&str] = &[STATUS_PLANNED, STATUS_BETA, STATUS_LIVE];

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::system("id", FieldKind::BigInteger, false),
    FieldSpec::required("code", FieldKind::Text),
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::defaulted("status", FieldKind::Text),
    FieldSpec::optional("launchDate", FieldKind::Timestamp),
];

/// A row from the `regions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: DbId,
    /// Short market code, unique across regions (e.g. `"US"`).
    pub code: String,
    pub name: String,
    pub status: String,
    pub launch_date: Option<Timestamp>,
}

impl Region {
    pub fn is_live(&self) -> bool {
        self.status == STATUS_LIVE
    }
}

/// Insertable region. `status` falls back to `planned` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegion {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<Timestamp>,
}

impl EntitySchema for Region {
    type Insert = NewRegion;

    const KIND: EntityKind = EntityKind::Region;
}
