//! Forward pricing: explicit sale price → fees, proceeds, profit, margin

use rust_decimal::prelude::*;
use shared::models::{FeeSchedule, PricingInput, PricingResult, PricingTarget, ResolutionStatus};

use super::fees::MarketplaceFees;
use super::money::{margin_percent, percent_of, to_decimal, to_f64};
use super::validation::validate_input;
use crate::core::{EngineResult, PricingError};

/// Computes every derived figure for one plan at one sale price
///
/// Plans share the algorithm; they differ only in the commission percent
/// carried by the input and the fee schedule the pricer is built with.
#[derive(Debug, Clone, Copy)]
pub struct ForwardPricer<'a> {
    schedule: &'a FeeSchedule,
}

impl<'a> ForwardPricer<'a> {
    pub fn new(schedule: &'a FeeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'a FeeSchedule {
        self.schedule
    }

    /// Fees at `sale_price`, honouring a caller shipping override
    pub fn fees_at(&self, input: &PricingInput, sale_price: Decimal) -> MarketplaceFees {
        let mut fees = MarketplaceFees::lookup(self.schedule, sale_price, to_decimal(input.weight_kg));
        if let Some(shipping) = input.shipping_override {
            fees.shipping = to_decimal(shipping);
        }
        fees
    }

    /// Price an input whose target is an explicit sale price
    pub fn price_to_result(&self, input: &PricingInput) -> EngineResult<PricingResult> {
        validate_input(input)?;
        match input.target {
            PricingTarget::SalePrice(price) => Ok(self.price_at(input, to_decimal(price))),
            PricingTarget::DesiredMargin(_) => Err(PricingError::invalid_input(
                "target",
                "forward pricing needs an explicit sale price",
            )),
        }
    }

    /// Full result at `sale_price`, skipping validation
    ///
    /// Callers must have validated `input` and ensured `sale_price >= 0`.
    pub(crate) fn price_at(&self, input: &PricingInput, sale_price: Decimal) -> PricingResult {
        let cost_total = to_decimal(input.cost_total);

        // Unpriced item: nothing is sold, so nothing is charged
        if sale_price <= Decimal::ZERO {
            return PricingResult {
                sale_price: 0.0,
                shipping_fee: 0.0,
                fixed_fee: 0.0,
                commission_value: 0.0,
                percent_costs_value: 0.0,
                net_proceeds: 0.0,
                profit: to_f64(-cost_total),
                margin_percent: None,
                status: ResolutionStatus::Forward,
                iterations: 0,
            };
        }

        let commission_value = percent_of(sale_price, to_decimal(input.commission_percent));
        let percent_costs_value = percent_of(sale_price, to_decimal(input.percent_costs()));
        let fees = self.fees_at(input, sale_price);

        if fees.shipping.is_zero()
            && input.shipping_override.is_none()
            && input.weight_kg > 0.0
            && !self.schedule.shipping.is_empty()
        {
            tracing::warn!(
                sale_price = %sale_price,
                weight_kg = input.weight_kg,
                "No shipping tier covers this listing, shipping charged as zero"
            );
        }

        let net_proceeds = sale_price - percent_costs_value - fees.total();
        let profit = net_proceeds - cost_total;

        PricingResult {
            sale_price: to_f64(sale_price),
            shipping_fee: to_f64(fees.shipping),
            fixed_fee: to_f64(fees.fixed),
            commission_value: to_f64(commission_value),
            percent_costs_value: to_f64(percent_costs_value),
            net_proceeds: to_f64(net_proceeds),
            profit: to_f64(profit),
            margin_percent: margin_percent(profit, sale_price),
            status: ResolutionStatus::Forward,
            iterations: 0,
        }
    }
}
