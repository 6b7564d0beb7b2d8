//! Marketplace Tables
//!
//! Immutable bundle of fee schedules and pricing categories, loaded once by the
//! caller and shared by reference across calculations.

use serde::{Deserialize, Serialize};

use super::commission::Plan;
use super::fee_schedule::FeeSchedule;
use super::store::PricingCategory;
use crate::error::{AppError, AppResult, ErrorCode};

/// Largest fee amount or fee percentage a tier may carry
pub const MAX_TIER_AMOUNT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceTables {
    /// Fee schedule used by every plan without its own override
    #[serde(default)]
    pub fees: FeeSchedule,
    /// Premium-specific schedule, when the marketplace charges it differently
    #[serde(default)]
    pub premium_fees: Option<FeeSchedule>,
    #[serde(default)]
    pub categories: Vec<PricingCategory>,
}

impl MarketplaceTables {
    pub fn new(fees: FeeSchedule) -> Self {
        Self {
            fees,
            premium_fees: None,
            categories: Vec::new(),
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let tables: Self = serde_json::from_str(json).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidTierTable, format!("invalid tables: {}", e))
        })?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn schedule_for(&self, plan: Plan) -> &FeeSchedule {
        match plan {
            Plan::Premium => self.premium_fees.as_ref().unwrap_or(&self.fees),
            Plan::Classico => &self.fees,
        }
    }

    pub fn category(&self, name: &str) -> Option<&PricingCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Reject inverted ranges and negative amounts
    pub fn validate(&self) -> AppResult<()> {
        let schedules = std::iter::once(("fees", &self.fees))
            .chain(self.premium_fees.as_ref().map(|s| ("premium_fees", s)));

        for (name, schedule) in schedules {
            for (index, tier) in schedule.shipping.iter().enumerate() {
                check_range(name, "shipping", index, tier.min_sale, tier.max_sale)?;
                check_range(name, "shipping", index, tier.min_weight_g, tier.max_weight_g)?;
                check_amount(name, "shipping", index, tier.cost)?;
            }
            for (index, tier) in schedule.fixed.iter().enumerate() {
                check_range(name, "fixed", index, tier.min_sale, tier.max_sale)?;
                check_amount(name, "fixed", index, tier.fixed_amount)?;
                check_amount(name, "fixed", index, tier.percent_amount)?;
            }
        }
        Ok(())
    }
}

fn tier_error(schedule: &str, table: &str, index: usize, msg: String) -> AppError {
    AppError::with_message(ErrorCode::InvalidTierTable, msg)
        .with_detail("schedule", schedule)
        .with_detail("table", table)
        .with_detail("index", index)
}

fn check_range(
    schedule: &str,
    table: &str,
    index: usize,
    min: f64,
    max: Option<f64>,
) -> AppResult<()> {
    let finite = min.is_finite() && max.is_none_or(f64::is_finite);
    if !finite || max.is_some_and(|m| m < min) {
        return Err(tier_error(
            schedule,
            table,
            index,
            format!("{} tier {} has an invalid range ({} .. {:?})", table, index, min, max),
        ));
    }
    Ok(())
}

fn check_amount(schedule: &str, table: &str, index: usize, value: f64) -> AppResult<()> {
    if !(0.0..=MAX_TIER_AMOUNT).contains(&value) {
        return Err(tier_error(
            schedule,
            table,
            index,
            format!(
                "{} tier {} amount must be between 0 and {} ({})",
                table, index, MAX_TIER_AMOUNT, value
            ),
        ));
    }
    Ok(())
}
