//! Portfolio cost simulation
//!
//! What happens to revenue, cost and margin across saved pricings if the unit
//! cost of every item changes. Sale prices are held constant.

use rust_decimal::prelude::*;
use shared::models::{CostAction, PortfolioItem, SimulationOutcome, SimulationTotals};

use super::money::{margin_percent, percent_of, to_decimal, to_f64};
use super::validation::{MAX_AMOUNT, MAX_PERCENT, MAX_QUANTITY};
use crate::core::{EngineResult, PricingError};

/// Unit cost after `action`, never below zero
pub fn apply_cost_action(unit_cost: Decimal, action: CostAction) -> Decimal {
    let adjusted = match action {
        CostAction::PercentIncrease(v) => unit_cost + percent_of(unit_cost, to_decimal(v)),
        CostAction::PercentDecrease(v) => unit_cost - percent_of(unit_cost, to_decimal(v)),
        CostAction::ValueIncrease(v) => unit_cost + to_decimal(v),
        CostAction::ValueDecrease(v) => unit_cost - to_decimal(v),
    };
    adjusted.max(Decimal::ZERO)
}

/// The action's value and the largest value it may take
fn action_value(action: CostAction) -> (f64, f64) {
    match action {
        CostAction::PercentIncrease(v) | CostAction::PercentDecrease(v) => (v, MAX_PERCENT),
        CostAction::ValueIncrease(v) | CostAction::ValueDecrease(v) => (v, MAX_AMOUNT),
    }
}

fn in_range(value: f64, max: f64) -> bool {
    value.is_finite() && value.abs() <= max
}

fn aggregate(items: &[PortfolioItem], action: Option<CostAction>) -> SimulationTotals {
    let mut revenue = Decimal::ZERO;
    let mut cost = Decimal::ZERO;

    for item in items {
        let quantity = if item.quantity > 0.0 {
            to_decimal(item.quantity)
        } else {
            Decimal::ONE
        };
        let unit_cost = to_decimal(item.unit_cost);
        let unit_cost = match action {
            Some(action) => apply_cost_action(unit_cost, action),
            None => unit_cost,
        };

        revenue += to_decimal(item.sale_price) * quantity;
        cost += unit_cost * quantity;
    }

    let profit = revenue - cost;
    SimulationTotals {
        revenue_total: to_f64(revenue),
        cost_total: to_f64(cost),
        profit_total: to_f64(profit),
        average_margin_percent: margin_percent(profit, revenue),
        item_count: items.len(),
    }
}

/// Totals before and after applying `action` to every item's unit cost
pub fn simulate_cost_change(
    items: &[PortfolioItem],
    action: CostAction,
) -> EngineResult<SimulationOutcome> {
    let (value, max) = action_value(action);
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(PricingError::invalid_input(
            "value",
            format!("must be a number between 0 and {}, got {}", max, value),
        ));
    }
    for (index, item) in items.iter().enumerate() {
        if !in_range(item.sale_price, MAX_AMOUNT)
            || !in_range(item.unit_cost, MAX_AMOUNT)
            || !in_range(item.quantity, f64::from(MAX_QUANTITY))
        {
            return Err(PricingError::invalid_input(
                format!("items[{}]", index),
                format!(
                    "sale price and unit cost must be finite and within {}, quantity within {}",
                    MAX_AMOUNT, MAX_QUANTITY
                ),
            ));
        }
    }

    let outcome = SimulationOutcome {
        before: aggregate(items, None),
        after: aggregate(items, Some(action)),
    };
    tracing::debug!(
        items = items.len(),
        profit_before = outcome.before.profit_total,
        profit_after = outcome.after.profit_total,
        "Cost change simulated"
    );
    Ok(outcome)
}
