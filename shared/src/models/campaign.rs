//! Campaign Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Adjustment type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    /// Value is a percentage (10 = 10%)
    Percentage,
    /// Value is a currency amount
    #[serde(alias = "FIXED")]
    FixedAmount,
}

/// How the campaign price is derived from the base price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CampaignAdjustment {
    /// Signed percentage change, then floor/ceiling clamp
    Delta {
        /// Positive increases the price, negative reduces it
        delta_percent: f64,
        #[serde(default)]
        floor_price: Option<f64>,
        #[serde(default)]
        ceiling_price: Option<f64>,
    },
    /// Straight discount, never clamped
    Discount {
        discount_type: AdjustmentType,
        discount_value: f64,
    },
}

/// Coupon (charged to the seller) or cashback (credited by the marketplace)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Incentive {
    #[serde(rename = "type")]
    pub kind: AdjustmentType,
    pub value: f64,
}

/// Campaign validity period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignWindow {
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

impl CampaignWindow {
    /// Inclusive on both ends
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.starts_at && at <= self.ends_at
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignParameters {
    pub adjustment: CampaignAdjustment,
    #[serde(default)]
    pub coupon: Option<Incentive>,
    #[serde(default)]
    pub cashback: Option<Incentive>,
    #[serde(default)]
    pub window: Option<CampaignWindow>,
}

impl CampaignParameters {
    pub fn delta(delta_percent: f64) -> Self {
        Self {
            adjustment: CampaignAdjustment::Delta {
                delta_percent,
                floor_price: None,
                ceiling_price: None,
            },
            coupon: None,
            cashback: None,
            window: None,
        }
    }

    pub fn discount(discount_type: AdjustmentType, discount_value: f64) -> Self {
        Self {
            adjustment: CampaignAdjustment::Discount {
                discount_type,
                discount_value,
            },
            coupon: None,
            cashback: None,
            window: None,
        }
    }

    pub fn with_coupon(mut self, kind: AdjustmentType, value: f64) -> Self {
        self.coupon = Some(Incentive { kind, value });
        self
    }

    pub fn with_cashback(mut self, kind: AdjustmentType, value: f64) -> Self {
        self.cashback = Some(Incentive { kind, value });
        self
    }

    pub fn with_window(mut self, window: CampaignWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// Outcome of applying a campaign to one plan's base price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPricingResult {
    pub base_price: f64,
    /// Campaign price after adjustment and clamp
    pub sale_price: f64,
    pub shipping_fee: f64,
    pub fixed_fee: f64,
    pub commission_value: f64,
    pub percent_costs_value: f64,
    pub coupon_cost: f64,
    pub cashback_credit: f64,
    /// Marketplace payout after fees and coupon cost
    pub net_proceeds: f64,
    /// Forward profit + cashback − coupon
    pub profit: f64,
    /// None when the campaign price is zero
    pub margin_percent: Option<f64>,
}
