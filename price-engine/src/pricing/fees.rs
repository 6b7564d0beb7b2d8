//! Fee Schedule Lookup
//!
//! Shipping cost and fixed listing fee for a sale price, taken from the first
//! tier (in table order) whose inclusive bounds match. Missing coverage is not
//! an error: the fee is zero.

use rust_decimal::prelude::*;
use shared::models::{FeeSchedule, FixedFeeTable, FixedFeeTier, ShippingFeeTable, ShippingFeeTier};

use super::money::{percent_of, to_decimal};

const GRAMS_PER_KG: Decimal = Decimal::ONE_THOUSAND;

/// Inclusive range check; an absent upper bound is unbounded
#[inline]
fn within(value: Decimal, min: f64, max: Option<f64>) -> bool {
    value >= to_decimal(min) && max.is_none_or(|m| value <= to_decimal(m))
}

/// Check if a shipping tier covers a price and weight (grams)
pub fn matches_shipping_tier(tier: &ShippingFeeTier, sale_price: Decimal, weight_g: Decimal) -> bool {
    within(sale_price, tier.min_sale, tier.max_sale)
        && within(weight_g, tier.min_weight_g, tier.max_weight_g)
}

/// Check if a fixed-fee tier covers a price
pub fn matches_fixed_tier(tier: &FixedFeeTier, sale_price: Decimal) -> bool {
    within(sale_price, tier.min_sale, tier.max_sale)
}

/// Shipping cost for `sale_price` and `weight_kg`
///
/// Returns zero when the weight is not positive or no tier matches.
pub fn shipping_fee(sale_price: Decimal, weight_kg: Decimal, tiers: &ShippingFeeTable) -> Decimal {
    if weight_kg <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let weight_g = weight_kg * GRAMS_PER_KG;

    match tiers.first_match(|t| matches_shipping_tier(t, sale_price, weight_g)) {
        Some(tier) => to_decimal(tier.cost),
        None => {
            if !tiers.is_empty() {
                tracing::debug!(
                    sale_price = %sale_price,
                    weight_g = %weight_g,
                    "No shipping tier covers price/weight"
                );
            }
            Decimal::ZERO
        }
    }
}

/// Fixed fee for `sale_price`: flat amount plus the tier's percentage of price
pub fn fixed_fee(sale_price: Decimal, tiers: &FixedFeeTable) -> Decimal {
    match tiers.first_match(|t| matches_fixed_tier(t, sale_price)) {
        Some(tier) => {
            to_decimal(tier.fixed_amount) + percent_of(sale_price, to_decimal(tier.percent_amount))
        }
        None => {
            if !tiers.is_empty() {
                tracing::debug!(sale_price = %sale_price, "No fixed fee tier covers price");
            }
            Decimal::ZERO
        }
    }
}

/// Both fees from one schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketplaceFees {
    pub shipping: Decimal,
    pub fixed: Decimal,
}

impl MarketplaceFees {
    pub fn lookup(schedule: &FeeSchedule, sale_price: Decimal, weight_kg: Decimal) -> Self {
        Self {
            shipping: shipping_fee(sale_price, weight_kg, &schedule.shipping),
            fixed: fixed_fee(sale_price, &schedule.fixed),
        }
    }

    pub fn total(&self) -> Decimal {
        self.shipping + self.fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::money::to_f64;

    fn shipping_tier(
        min_sale: f64,
        max_sale: Option<f64>,
        max_weight_g: Option<f64>,
        cost: f64,
    ) -> ShippingFeeTier {
        ShippingFeeTier {
            min_sale,
            max_sale,
            min_weight_g: 0.0,
            max_weight_g,
            cost,
        }
    }

    fn fixed_tier(min_sale: f64, max_sale: Option<f64>, fixed: f64, percent: f64) -> FixedFeeTier {
        FixedFeeTier {
            min_sale,
            max_sale,
            fixed_amount: fixed,
            percent_amount: percent,
        }
    }

    fn ship(price: f64, weight_kg: f64, table: &ShippingFeeTable) -> f64 {
        to_f64(shipping_fee(to_decimal(price), to_decimal(weight_kg), table))
    }

    #[test]
    fn test_shipping_bounds_are_inclusive() {
        let table = ShippingFeeTable::new(vec![shipping_tier(50.0, Some(100.0), Some(1000.0), 15.0)]);

        assert_eq!(ship(50.0, 0.5, &table), 15.0);
        assert_eq!(ship(100.0, 0.5, &table), 15.0);
        assert_eq!(ship(100.01, 0.5, &table), 0.0);
        assert_eq!(ship(49.99, 0.5, &table), 0.0);
    }

    #[test]
    fn test_weight_compared_in_grams() {
        let table = ShippingFeeTable::new(vec![shipping_tier(0.0, None, Some(1000.0), 15.0)]);

        assert_eq!(ship(80.0, 1.0, &table), 15.0);
        assert_eq!(ship(80.0, 1.001, &table), 0.0);
    }

    #[test]
    fn test_non_positive_weight_charges_nothing() {
        let table = ShippingFeeTable::new(vec![shipping_tier(0.0, None, None, 15.0)]);

        assert_eq!(ship(80.0, 0.0, &table), 0.0);
        assert_eq!(ship(80.0, -1.0, &table), 0.0);
    }

    #[test]
    fn test_first_tier_in_table_order_wins() {
        let table = ShippingFeeTable::new(vec![
            shipping_tier(0.0, Some(200.0), None, 22.0),
            shipping_tier(50.0, Some(100.0), None, 15.0),
        ]);
        assert_eq!(ship(75.0, 0.3, &table), 22.0);

        let reversed = ShippingFeeTable::new(vec![
            shipping_tier(50.0, Some(100.0), None, 15.0),
            shipping_tier(0.0, Some(200.0), None, 22.0),
        ]);
        assert_eq!(ship(75.0, 0.3, &reversed), 15.0);
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(ship(75.0, 0.3, &ShippingFeeTable::default()), 0.0);
        assert_eq!(fixed_fee(to_decimal(75.0), &FixedFeeTable::default()), Decimal::ZERO);
    }

    #[test]
    fn test_fixed_fee_flat_plus_percent() {
        let table = FixedFeeTable::new(vec![
            fixed_tier(0.0, Some(78.99), 6.25, 0.0),
            fixed_tier(79.0, None, 1.0, 2.0),
        ]);

        assert_eq!(to_f64(fixed_fee(to_decimal(50.0), &table)), 6.25);
        // 1.00 + 2% of 150
        assert_eq!(to_f64(fixed_fee(to_decimal(150.0), &table)), 4.0);
    }

    #[test]
    fn test_fixed_fee_gap_between_tiers() {
        let table = FixedFeeTable::new(vec![
            fixed_tier(0.0, Some(78.99), 6.25, 0.0),
            fixed_tier(79.0, None, 0.0, 0.0),
        ]);
        assert_eq!(fixed_fee(to_decimal(78.995), &table), Decimal::ZERO);
    }

    #[test]
    fn test_marketplace_fees_lookup() {
        let schedule = FeeSchedule::new(
            ShippingFeeTable::new(vec![shipping_tier(79.0, None, Some(500.0), 19.95)]),
            FixedFeeTable::new(vec![fixed_tier(0.0, Some(78.99), 6.25, 0.0)]),
        );

        let cheap = MarketplaceFees::lookup(&schedule, to_decimal(60.0), to_decimal(0.3));
        assert_eq!(to_f64(cheap.shipping), 0.0);
        assert_eq!(to_f64(cheap.fixed), 6.25);

        let dear = MarketplaceFees::lookup(&schedule, to_decimal(120.0), to_decimal(0.3));
        assert_eq!(to_f64(dear.total()), 19.95);
    }
}
