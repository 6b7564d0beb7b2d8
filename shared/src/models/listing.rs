//! Listing Request / Quote Model
//!
//! Raw values as supplied by the form layer for both standard plans.

use serde::{Deserialize, Serialize};

use super::campaign::CampaignPricingResult;
use super::commission::Plan;
use super::pricing::{PricingResult, PricingTarget};
use super::product::ProductDimensions;

/// Per-plan part of a listing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// None falls back to the category default margin
    #[serde(default)]
    pub target: Option<PricingTarget>,
    #[serde(default)]
    pub shipping_override: Option<f64>,
}

impl PlanRequest {
    pub fn margin(margin_percent: f64) -> Self {
        Self {
            target: Some(PricingTarget::DesiredMargin(margin_percent)),
            shipping_override: None,
        }
    }

    pub fn price(sale_price: f64) -> Self {
        Self {
            target: Some(PricingTarget::SalePrice(sale_price)),
            shipping_override: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRequest {
    pub unit_cost: f64,
    pub quantity: i32,
    /// Explicit tax rate; None uses the store's rate for the fulfillment mode
    #[serde(default)]
    pub tax_percent: Option<f64>,
    #[serde(default)]
    pub fulfillment: bool,
    #[serde(default)]
    pub installment_percent: f64,
    #[serde(default)]
    pub other_percent: f64,
    pub commission_rule: String,
    #[serde(default)]
    pub dimensions: ProductDimensions,
    #[serde(default)]
    pub category: Option<String>,
    /// Cost currently registered for the supplier, for divergence warnings
    #[serde(default)]
    pub supplier_unit_cost: Option<f64>,
    #[serde(default)]
    pub classico: PlanRequest,
    #[serde(default)]
    pub premium: PlanRequest,
}

impl ListingRequest {
    pub fn plan(&self, plan: Plan) -> &PlanRequest {
        match plan {
            Plan::Classico => &self.classico,
            Plan::Premium => &self.premium,
        }
    }
}

/// Entered unit cost differs from the registered supplier cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostDivergence {
    pub entered: f64,
    pub supplier: f64,
    /// entered − supplier
    pub difference: f64,
}

/// Result for both standard plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingQuote {
    pub cost_total: f64,
    pub billable_weight_kg: f64,
    pub classico: PricingResult,
    pub premium: PricingResult,
    #[serde(default)]
    pub cost_divergence: Option<CostDivergence>,
}

impl ListingQuote {
    pub fn plan(&self, plan: Plan) -> &PricingResult {
        match plan {
            Plan::Classico => &self.classico,
            Plan::Premium => &self.premium,
        }
    }
}

/// Campaign result for both standard plans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignQuote {
    pub classico: CampaignPricingResult,
    pub premium: CampaignPricingResult,
}

impl CampaignQuote {
    pub fn plan(&self, plan: Plan) -> &CampaignPricingResult {
        match plan {
            Plan::Classico => &self.classico,
            Plan::Premium => &self.premium,
        }
    }
}
