//! Store Configuration Model

use serde::{Deserialize, Serialize};

use super::commission::CommissionRuleSet;

/// Per-store tax rates and commission rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Tax rate for regular shipments (%)
    #[serde(default)]
    pub standard_tax_percent: f64,
    /// Tax rate when the marketplace fulfills the order (%)
    #[serde(default)]
    pub fulfillment_tax_percent: f64,
    #[serde(default)]
    pub commission_rules: CommissionRuleSet,
}

impl StoreConfig {
    pub fn tax_percent(&self, fulfillment: bool) -> f64 {
        if fulfillment {
            self.fulfillment_tax_percent
        } else {
            self.standard_tax_percent
        }
    }
}

/// Named pricing category carrying a default desired margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCategory {
    pub name: String,
    pub default_margin_percent: f64,
    #[serde(default)]
    pub description: Option<String>,
}
