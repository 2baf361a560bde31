//! Product: a catalog item synced from the storefront platform.

use serde::{Deserialize, Serialize};

use super::{EntityKind, EntitySchema, FieldKind, FieldSpec, ValidationError};
use crate::types::{DbId, JsonDocument};

/// Inventory below this count is flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::system("id", FieldKind::BigInteger, false),
    FieldSpec::required("shopifyId", FieldKind::Text),
    FieldSpec::required("title", FieldKind::Text),
    FieldSpec::required("handle", FieldKind::Text),
    FieldSpec::defaulted("status", FieldKind::Text),
    FieldSpec::defaulted("inventoryCount", FieldKind::Integer),
    FieldSpec::required("price", FieldKind::Text),
    FieldSpec::defaulted("currency", FieldKind::Text),
    FieldSpec::optional("regionId", FieldKind::BigInteger),
    FieldSpec::optional("metadata", FieldKind::Json),
];

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    /// Identifier in the external storefront. Format is not checked.
    pub shopify_id: String,
    pub title: String,
    pub handle: String,
    pub status: String,
    /// May go negative; nothing clamps it.
    pub inventory_count: i32,
    /// Decimal amount kept as text so currency never passes through a float.
    pub price: String,
    pub currency: String,
    /// `None` means the product is global.
    pub region_id: Option<DbId>,
    pub metadata: Option<JsonDocument>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.inventory_count < LOW_STOCK_THRESHOLD
    }
}

/// Insertable product. `status`, `inventoryCount` and `currency` fall back to
/// `active`, `0` and `USD` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub shopify_id: String,
    pub title: String,
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_count: Option<i32>,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonDocument>,
}

impl EntitySchema for Product {
    type Insert = NewProduct;

    const KIND: EntityKind = EntityKind::Product;
}

/// Query string accepted by the product list operation (`?regionId=`).
///
/// The raw value stays a string on the wire; [`ProductFilter::region_id`]
/// does the integer coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
}

impl ProductFilter {
    pub fn for_region(region_id: DbId) -> Self {
        Self {
            region_id: Some(region_id.to_string()),
        }
    }

    /// Parsed region id. An empty value means no filter.
    pub fn region_id(&self) -> Result<Option<DbId>, ValidationError> {
        match self.region_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<DbId>().map(Some).map_err(|_| {
                ValidationError::field("regionId", "regionId must be an integer")
            }),
        }
    }
}
