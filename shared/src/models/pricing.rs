//! Pricing Input / Result Model

use serde::{Deserialize, Serialize};

/// What the caller asks the engine to resolve for one plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum PricingTarget {
    /// Solve for the sale price that yields this margin (25 = 25%)
    DesiredMargin(f64),
    /// Compute the margin produced by this explicit sale price
    SalePrice(f64),
}

/// Fully resolved numeric input for one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    /// unit cost × quantity
    pub cost_total: f64,
    pub tax_percent: f64,
    pub installment_percent: f64,
    pub other_percent: f64,
    /// Resolved from the commission rule and plan
    pub commission_percent: f64,
    /// Billable weight: max(real, volumetric)
    pub weight_kg: f64,
    /// Caller-supplied shipping cost, used verbatim instead of the tier lookup
    #[serde(default)]
    pub shipping_override: Option<f64>,
    pub target: PricingTarget,
}

impl PricingInput {
    /// Sum of every percentage applied to the sale price
    pub fn percent_costs(&self) -> f64 {
        self.tax_percent + self.installment_percent + self.other_percent + self.commission_percent
    }

    /// Same input, switched to forward mode at `sale_price`
    pub fn at_price(&self, sale_price: f64) -> Self {
        Self {
            target: PricingTarget::SalePrice(sale_price),
            ..self.clone()
        }
    }
}

/// How a [`PricingResult`] was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Explicit sale price, no solving involved
    Forward,
    /// Solver met the convergence threshold
    Converged,
    /// Solver exhausted its iteration budget; best-effort price
    IterationLimit,
    /// Percent costs plus desired margin reach 100%; price forced to zero
    InfeasibleMargin,
}

/// All derived figures for one plan at one sale price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub sale_price: f64,
    pub shipping_fee: f64,
    pub fixed_fee: f64,
    pub commission_value: f64,
    /// Every percentage cost (commission included) applied to the sale price
    pub percent_costs_value: f64,
    /// sale_price − percentage costs − fixed fee − shipping
    pub net_proceeds: f64,
    /// net_proceeds − cost_total
    pub profit: f64,
    /// profit / sale_price × 100; None when sale_price is zero
    pub margin_percent: Option<f64>,
    pub status: ResolutionStatus,
    /// Solver iterations spent (0 in forward mode)
    #[serde(default)]
    pub iterations: u32,
}

impl PricingResult {
    /// True unless the solver stopped on its iteration budget
    pub fn converged(&self) -> bool {
        !matches!(self.status, ResolutionStatus::IterationLimit)
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self.status, ResolutionStatus::InfeasibleMargin)
    }
}
