//! Money calculation utilities using rust_decimal for precision
//!
//! Records carry `f64`; all arithmetic converts to `Decimal`, computes, and
//! converts back rounded to cents.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// `value × percent / 100`
#[inline]
pub fn percent_of(value: Decimal, percent: Decimal) -> Decimal {
    value * percent / Decimal::ONE_HUNDRED
}

/// Margin as a percentage of price; None when the price is not positive
pub fn margin_percent(profit: Decimal, sale_price: Decimal) -> Option<f64> {
    if sale_price <= Decimal::ZERO {
        return None;
    }
    Some(to_f64(profit / sale_price * Decimal::ONE_HUNDRED))
}
