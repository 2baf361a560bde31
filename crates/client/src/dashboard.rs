//! Headline numbers shown on the admin dashboard.

use commerce_core::schema::{AutomationRule, Product, Region};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    pub active_automations: usize,
    pub live_regions: usize,
    /// Products under the low-stock threshold.
    pub low_stock_products: usize,
}

impl DashboardSummary {
    pub fn from_lists(
        regions: &[Region],
        products: &[Product],
        rules: &[AutomationRule],
    ) -> Self {
        Self {
            total_products: products.len(),
            active_automations: rules.iter().filter(|rule| rule.is_active).count(),
            live_regions: regions.iter().filter(|region| region.is_live()).count(),
            low_stock_products: products.iter().filter(|p| p.is_low_stock()).count(),
        }
    }
}
