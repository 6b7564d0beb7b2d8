//! Margin → price solver
//!
//! Fees are step functions of the sale price, so the price that yields a
//! desired margin is found by successive substitution:
//!
//! ```text
//! price[i+1] = (cost_total + shipping(price[i]) + fixed(price[i])) / (1 − (percent_costs + margin) / 100)
//! ```
//!
//! The loop is bounded, so it always terminates. The accepted price is rounded
//! to cents and priced forward once more, so the reported margin reflects the
//! fees actually charged at that price. An iterate that runs past
//! [`PRICE_CEILING`] means percentage fees outgrow the denominator; that margin
//! is reported as infeasible.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{PricingInput, PricingResult, PricingTarget, ResolutionStatus};

use super::forward::ForwardPricer;
use super::money::{round_money, to_decimal};
use super::validation::validate_input;
use crate::core::{EngineResult, PricingError};

/// Largest price the solver will iterate through
pub const PRICE_CEILING: i64 = 1_000_000_000_000;

/// Solver constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub max_iterations: u32,
    /// Convergence threshold in currency units
    pub tolerance: f64,
    /// Seed is `max(cost_total × seed_multiplier, seed_floor)`
    pub seed_multiplier: f64,
    pub seed_floor: f64,
    /// Denominators at or below this are infeasible
    pub min_denominator: f64,
}

impl SolverSettings {
    /// Reject settings under which the loop could never converge
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_iterations == 0 {
            return Err(PricingError::Configuration(
                "max_iterations must be at least 1".into(),
            ));
        }
        let positive = [
            ("tolerance", self.tolerance),
            ("min_denominator", self.min_denominator),
        ];
        let non_negative = [
            ("seed_multiplier", self.seed_multiplier),
            ("seed_floor", self.seed_floor),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PricingError::Configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            tolerance: 0.01,
            seed_multiplier: 1.5,
            seed_floor: 50.0,
            min_denominator: 0.0001,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarginSolver<'a> {
    pricer: ForwardPricer<'a>,
    settings: SolverSettings,
}

impl<'a> MarginSolver<'a> {
    pub fn new(pricer: ForwardPricer<'a>, settings: SolverSettings) -> Self {
        Self { pricer, settings }
    }

    /// Solve for the sale price that yields the input's desired margin
    pub fn margin_to_price(&self, input: &PricingInput) -> EngineResult<PricingResult> {
        self.settings.validate()?;
        validate_input(input)?;
        let desired_margin = match input.target {
            PricingTarget::DesiredMargin(m) => m,
            PricingTarget::SalePrice(_) => {
                return Err(PricingError::invalid_input(
                    "target",
                    "solving needs a desired margin",
                ));
            }
        };

        let cost_total = to_decimal(input.cost_total);
        let denominator = Decimal::ONE
            - to_decimal(input.percent_costs() + desired_margin) / Decimal::ONE_HUNDRED;

        if denominator <= to_decimal(self.settings.min_denominator) {
            tracing::warn!(
                percent_costs = input.percent_costs(),
                desired_margin,
                "Desired margin is infeasible: percent costs plus margin reach 100%"
            );
            return Ok(PricingResult {
                status: ResolutionStatus::InfeasibleMargin,
                ..self.pricer.price_at(input, Decimal::ZERO)
            });
        }

        let tolerance = to_decimal(self.settings.tolerance);
        let ceiling = Decimal::from(PRICE_CEILING);
        let seed = (cost_total * to_decimal(self.settings.seed_multiplier))
            .max(to_decimal(self.settings.seed_floor));

        let mut price = seed;
        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.settings.max_iterations {
            iterations += 1;
            let fees = self.pricer.fees_at(input, price);
            let next = match (cost_total + fees.total()).checked_div(denominator) {
                Some(next) if next <= ceiling => next,
                _ => {
                    tracing::warn!(
                        iterations,
                        price = %price,
                        desired_margin,
                        "Solver diverged: percentage fees outgrow the margin denominator"
                    );
                    return Ok(PricingResult {
                        status: ResolutionStatus::InfeasibleMargin,
                        iterations,
                        ..self.pricer.price_at(input, Decimal::ZERO)
                    });
                }
            };
            let step = (next - price).abs();
            price = next;
            if step < tolerance {
                converged = true;
                break;
            }
        }

        let status = if converged {
            ResolutionStatus::Converged
        } else {
            tracing::warn!(
                iterations,
                price = %price,
                "Margin solver exhausted its iteration budget, returning best effort price"
            );
            ResolutionStatus::IterationLimit
        };

        let sale_price = round_money(price);
        tracing::debug!(iterations, sale_price = %sale_price, desired_margin, "Margin solved");

        Ok(PricingResult {
            status,
            iterations,
            ..self.pricer.price_at(input, sale_price)
        })
    }
}
