//! Product Dimensions Model

use serde::{Deserialize, Serialize};

/// Default cubic centimetres per billable kilogram
pub const DEFAULT_VOLUMETRIC_DIVISOR: f64 = 6000.0;

/// Physical package data used to derive billable weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDimensions {
    #[serde(default)]
    pub real_weight_kg: f64,
    #[serde(default)]
    pub height_cm: f64,
    #[serde(default)]
    pub width_cm: f64,
    #[serde(default)]
    pub length_cm: f64,
}

impl ProductDimensions {
    /// Package with a known weight and no dimensions
    pub fn weight_only(real_weight_kg: f64) -> Self {
        Self {
            real_weight_kg,
            ..Self::default()
        }
    }

    /// height × width × length / divisor
    pub fn volumetric_weight_kg(&self, divisor: f64) -> f64 {
        if divisor <= 0.0 {
            return 0.0;
        }
        self.height_cm * self.width_cm * self.length_cm / divisor
    }

    /// Larger of real and volumetric weight
    pub fn billable_weight_kg(&self, divisor: f64) -> f64 {
        self.real_weight_kg.max(self.volumetric_weight_kg(divisor))
    }
}
