//! Portfolio Simulation Model

use serde::{Deserialize, Serialize};

/// One saved pricing, as seen by the cost simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub sale_price: f64,
    pub unit_cost: f64,
    /// Values ≤ 0 count as 1
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

/// Cost change applied to every item in a simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "value", rename_all = "snake_case")]
pub enum CostAction {
    PercentIncrease(f64),
    PercentDecrease(f64),
    ValueIncrease(f64),
    ValueDecrease(f64),
}

/// Aggregated figures over a portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationTotals {
    pub revenue_total: f64,
    pub cost_total: f64,
    pub profit_total: f64,
    /// None when revenue is zero
    pub average_margin_percent: Option<f64>,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub before: SimulationTotals,
    pub after: SimulationTotals,
}
