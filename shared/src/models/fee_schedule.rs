//! Fee Schedule Model
//!
//! Range-based tier tables for marketplace shipping cost and fixed listing fee.
//! Table order is part of the contract: lookups return the first matching tier.

use serde::{Deserialize, Serialize};

/// Shipping cost bracket, by sale price and package weight (grams)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingFeeTier {
    /// Lowest sale price covered (inclusive)
    #[serde(default)]
    pub min_sale: f64,
    /// Highest sale price covered (inclusive, None = unbounded)
    #[serde(default)]
    pub max_sale: Option<f64>,
    /// Lightest weight covered in grams (inclusive)
    #[serde(default)]
    pub min_weight_g: f64,
    /// Heaviest weight covered in grams (inclusive, None = unbounded)
    #[serde(default)]
    pub max_weight_g: Option<f64>,
    /// Shipping cost charged to the seller
    pub cost: f64,
}

/// Fixed listing fee bracket, by sale price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedFeeTier {
    #[serde(default)]
    pub min_sale: f64,
    #[serde(default)]
    pub max_sale: Option<f64>,
    /// Flat amount charged per sale
    #[serde(default)]
    pub fixed_amount: f64,
    /// Additional percentage of the sale price (5 = 5%)
    #[serde(default)]
    pub percent_amount: f64,
}

/// Ordered tier table
///
/// Ranges may overlap. The first tier in table order whose bounds match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable<T> {
    tiers: Vec<T>,
}

impl<T> TierTable<T> {
    pub fn new(tiers: Vec<T>) -> Self {
        Self { tiers }
    }

    /// First tier in table order satisfying `predicate`
    pub fn first_match(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.tiers.iter().find(|tier| predicate(tier))
    }

    /// Tiers in table order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl<T> Default for TierTable<T> {
    fn default() -> Self {
        Self { tiers: Vec::new() }
    }
}

impl<T> From<Vec<T>> for TierTable<T> {
    fn from(tiers: Vec<T>) -> Self {
        Self::new(tiers)
    }
}

pub type ShippingFeeTable = TierTable<ShippingFeeTier>;
pub type FixedFeeTable = TierTable<FixedFeeTier>;

/// Shipping and fixed-fee tables for one plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    #[serde(default)]
    pub shipping: ShippingFeeTable,
    #[serde(default)]
    pub fixed: FixedFeeTable,
}

impl FeeSchedule {
    pub fn new(shipping: ShippingFeeTable, fixed: FixedFeeTable) -> Self {
        Self { shipping, fixed }
    }
}
