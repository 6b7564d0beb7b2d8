//! Campaign price adjustment
//!
//! Turns a plan's base price into a campaign price, then layers coupon cost
//! (charged to the seller) and cashback credit (funded by the marketplace) on
//! top of the forward result at that price.

use rust_decimal::prelude::*;
use shared::models::{
    AdjustmentType, CampaignAdjustment, CampaignParameters, CampaignPricingResult, Incentive,
    PricingInput,
};

use super::forward::ForwardPricer;
use super::money::{margin_percent, percent_of, round_money, to_decimal, to_f64};
use super::validation::{require_amount, validate_campaign, validate_input};
use crate::core::EngineResult;

/// Floor and ceiling only count when positive
#[inline]
fn positive_bound(bound: Option<f64>) -> Option<Decimal> {
    bound.filter(|b| *b > 0.0).map(to_decimal)
}

/// Campaign price before fees; may be negative
///
/// The adjusted price is rounded to cents first. Delta mode then clamps to the
/// floor and the ceiling as given, floor first, so a ceiling below the floor
/// wins. Discount mode is never clamped.
pub fn adjusted_price(base_price: Decimal, adjustment: &CampaignAdjustment) -> Decimal {
    match adjustment {
        CampaignAdjustment::Delta {
            delta_percent,
            floor_price,
            ceiling_price,
        } => {
            let mut price =
                round_money(base_price + percent_of(base_price, to_decimal(*delta_percent)));
            if let Some(floor) = positive_bound(*floor_price)
                && price < floor
            {
                price = floor;
            }
            if let Some(ceiling) = positive_bound(*ceiling_price)
                && price > ceiling
            {
                price = ceiling;
            }
            price
        }
        CampaignAdjustment::Discount {
            discount_type,
            discount_value,
        } => {
            let value = to_decimal(*discount_value);
            round_money(match discount_type {
                AdjustmentType::Percentage => base_price - percent_of(base_price, value),
                AdjustmentType::FixedAmount => base_price - value,
            })
        }
    }
}

/// Coupon cost or cashback credit at `price`
fn incentive_amount(incentive: Option<&Incentive>, price: Decimal) -> Decimal {
    match incentive {
        Some(Incentive {
            kind: AdjustmentType::Percentage,
            value,
        }) => percent_of(price, to_decimal(*value)),
        Some(Incentive {
            kind: AdjustmentType::FixedAmount,
            value,
        }) => to_decimal(*value),
        None => Decimal::ZERO,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CampaignAdjuster<'a> {
    pricer: ForwardPricer<'a>,
}

impl<'a> CampaignAdjuster<'a> {
    pub fn new(pricer: ForwardPricer<'a>) -> Self {
        Self { pricer }
    }

    /// Result for an item that cannot be sold at a positive price
    ///
    /// Every figure is zero except profit, which is the negated cost.
    pub fn unpriced(&self, input: &PricingInput, base_price: f64) -> CampaignPricingResult {
        CampaignPricingResult {
            base_price: to_f64(to_decimal(base_price)),
            sale_price: 0.0,
            shipping_fee: 0.0,
            fixed_fee: 0.0,
            commission_value: 0.0,
            percent_costs_value: 0.0,
            coupon_cost: 0.0,
            cashback_credit: 0.0,
            net_proceeds: 0.0,
            profit: to_f64(-to_decimal(input.cost_total)),
            margin_percent: None,
        }
    }

    /// Apply `params` to `base_price` for the plan described by `input`
    ///
    /// The target carried by `input` is ignored; only its costs, rates and
    /// weight are used.
    pub fn adjust(
        &self,
        input: &PricingInput,
        base_price: f64,
        params: &CampaignParameters,
    ) -> EngineResult<CampaignPricingResult> {
        require_amount(base_price, "base_price")?;
        validate_input(&input.at_price(base_price))?;
        validate_campaign(params)?;

        let base = to_decimal(base_price);
        let price = adjusted_price(base, &params.adjustment);

        if price <= Decimal::ZERO {
            tracing::warn!(
                base_price,
                campaign_price = %price,
                "Campaign price fell to zero or below, reporting an unpriced item"
            );
            return Ok(self.unpriced(input, base_price));
        }

        let forward = self.pricer.price_at(input, price);
        let coupon_cost = round_money(incentive_amount(params.coupon.as_ref(), price));
        let cashback_credit = round_money(incentive_amount(params.cashback.as_ref(), price));

        let net_proceeds = to_decimal(forward.net_proceeds) - coupon_cost;
        let profit = to_decimal(forward.profit) + cashback_credit - coupon_cost;

        tracing::debug!(
            base_price,
            campaign_price = %price,
            coupon = %coupon_cost,
            cashback = %cashback_credit,
            "Campaign applied"
        );

        Ok(CampaignPricingResult {
            base_price: to_f64(base),
            sale_price: forward.sale_price,
            shipping_fee: forward.shipping_fee,
            fixed_fee: forward.fixed_fee,
            commission_value: forward.commission_value,
            percent_costs_value: forward.percent_costs_value,
            coupon_cost: to_f64(coupon_cost),
            cashback_credit: to_f64(cashback_credit),
            net_proceeds: to_f64(net_proceeds),
            profit: to_f64(profit),
            margin_percent: margin_percent(profit, price),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PricingError;
    use shared::models::{FeeSchedule, PricingTarget};

    fn delta(delta_percent: f64, floor: Option<f64>, ceiling: Option<f64>) -> CampaignAdjustment {
        CampaignAdjustment::Delta {
            delta_percent,
            floor_price: floor,
            ceiling_price: ceiling,
        }
    }

    fn price(base: f64, adjustment: &CampaignAdjustment) -> f64 {
        to_f64(adjusted_price(to_decimal(base), adjustment))
    }

    fn input(cost_total: f64) -> PricingInput {
        PricingInput {
            cost_total,
            tax_percent: 0.0,
            installment_percent: 0.0,
            other_percent: 0.0,
            commission_percent: 0.0,
            weight_kg: 0.0,
            shipping_override: None,
            target: PricingTarget::SalePrice(0.0),
        }
    }

    #[test]
    fn test_delta_floor_then_ceiling() {
        assert_eq!(price(100.0, &delta(-20.0, None, None)), 80.0);
        assert_eq!(price(100.0, &delta(-20.0, Some(90.0), None)), 90.0);
        assert_eq!(price(100.0, &delta(-20.0, Some(90.0), Some(85.0))), 85.0);
    }

    #[test]
    fn test_delta_increase_capped_by_ceiling() {
        assert_eq!(price(100.0, &delta(15.0, None, Some(110.0))), 110.0);
        assert_eq!(price(100.0, &delta(15.0, None, None)), 115.0);
    }

    #[test]
    fn test_non_positive_bounds_ignored() {
        assert_eq!(price(100.0, &delta(-20.0, Some(0.0), Some(-1.0))), 80.0);
    }

    #[test]
    fn test_delta_rounds_to_cents() {
        assert_eq!(price(99.99, &delta(-12.5, None, None)), 87.49);
    }

    #[test]
    fn test_delta_rounds_before_clamping() {
        // 80.00 sits below a floor of 80.004, so the floor is taken as given
        let floored = adjusted_price(to_decimal(100.0), &delta(-20.0, Some(80.004), None));
        assert_eq!(floored, to_decimal(80.004));

        let capped = adjusted_price(to_decimal(100.0), &delta(10.0, None, Some(109.996)));
        assert_eq!(capped, to_decimal(109.996));

        // 87.49125 rounds to 87.49, which clears a floor of 87.488
        let cleared = adjusted_price(to_decimal(99.99), &delta(-12.5, Some(87.488), None));
        assert_eq!(cleared, to_decimal(87.49));
    }

    #[test]
    fn test_discount_modes_are_not_clamped() {
        let pct = CampaignAdjustment::Discount {
            discount_type: AdjustmentType::Percentage,
            discount_value: 25.0,
        };
        let fixed = CampaignAdjustment::Discount {
            discount_type: AdjustmentType::FixedAmount,
            discount_value: 130.0,
        };
        assert_eq!(price(100.0, &pct), 75.0);
        assert_eq!(price(100.0, &fixed), -30.0);
    }

    #[test]
    fn test_coupon_and_cashback_cancel_out() {
        let schedule = FeeSchedule::default();
        let adjuster = CampaignAdjuster::new(ForwardPricer::new(&schedule));
        let params = CampaignParameters::delta(0.0)
            .with_coupon(AdjustmentType::FixedAmount, 10.0)
            .with_cashback(AdjustmentType::Percentage, 5.0);

        let result = adjuster.adjust(&input(120.0), 200.0, &params).unwrap();

        assert_eq!(result.sale_price, 200.0);
        assert_eq!(result.coupon_cost, 10.0);
        assert_eq!(result.cashback_credit, 10.0);
        assert_eq!(result.net_proceeds, 190.0);
        assert_eq!(result.profit, 80.0);
        assert_eq!(result.margin_percent, Some(40.0));
    }

    #[test]
    fn test_price_at_or_below_zero_collapses() {
        let schedule = FeeSchedule::default();
        let adjuster = CampaignAdjuster::new(ForwardPricer::new(&schedule));
        let params = CampaignParameters::discount(AdjustmentType::FixedAmount, 150.0)
            .with_coupon(AdjustmentType::FixedAmount, 10.0);

        let result = adjuster.adjust(&input(40.0), 100.0, &params).unwrap();

        assert_eq!(result.base_price, 100.0);
        assert_eq!(result.sale_price, 0.0);
        assert_eq!(result.net_proceeds, 0.0);
        assert_eq!(result.profit, -40.0);
        assert_eq!(result.coupon_cost, 0.0);
        assert_eq!(result.margin_percent, None);
    }

    #[test]
    fn test_negative_base_price_rejected() {
        let schedule = FeeSchedule::default();
        let adjuster = CampaignAdjuster::new(ForwardPricer::new(&schedule));
        let err = adjuster
            .adjust(&input(40.0), -1.0, &CampaignParameters::delta(-10.0))
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { ref field, .. } if field == "base_price"));
    }

    #[test]
    fn test_base_price_beyond_cap_rejected() {
        let schedule = FeeSchedule::default();
        let adjuster = CampaignAdjuster::new(ForwardPricer::new(&schedule));
        let params = CampaignParameters::delta(-10.0);

        assert!(adjuster.adjust(&input(40.0), 1_000_000.0, &params).is_ok());
        let err = adjuster
            .adjust(&input(40.0), 1_000_000.01, &params)
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { ref field, .. } if field == "base_price"));
    }

    #[test]
    fn test_invalid_discount_rejected() {
        let schedule = FeeSchedule::default();
        let adjuster = CampaignAdjuster::new(ForwardPricer::new(&schedule));
        let params = CampaignParameters::discount(AdjustmentType::Percentage, f64::NAN);
        assert!(matches!(
            adjuster.adjust(&input(40.0), 100.0, &params),
            Err(PricingError::InvalidCampaign(_))
        ));
    }
}
