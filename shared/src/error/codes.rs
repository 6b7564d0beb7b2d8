//! Unified error codes for the pricing workspace
//!
//! This module defines all error codes surfaced by the price engine to its callers.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Pricing errors
//! - 2xxx: Campaign errors
//! - 3xxx: Configuration errors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ErrorCategory;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// A field failed validation
    ValidationFailed = 2,

    // ==================== 1xxx: Pricing ====================
    /// Commission rule key not present in the rule set
    UnknownCommissionRule = 1001,
    /// Plan identifier not recognised
    UnknownPlan = 1002,
    /// Pricing category not present in the catalog
    UnknownCategory = 1004,
    /// Explicit sale price is negative
    NegativeSalePrice = 1005,

    // ==================== 2xxx: Campaign ====================
    /// Campaign parameters are invalid
    InvalidCampaign = 2001,
    /// Campaign window ends before it starts
    InvalidCampaignWindow = 2002,

    // ==================== 3xxx: Configuration ====================
    /// Configuration could not be loaded
    ConfigurationError = 3001,
    /// Tier table document could not be parsed
    InvalidTierTable = 3002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the category this code belongs to
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Pricing
            ErrorCode::UnknownCommissionRule => "Commission rule not found",
            ErrorCode::UnknownPlan => "Unknown listing plan",
            ErrorCode::UnknownCategory => "Pricing category not found",
            ErrorCode::NegativeSalePrice => "Sale price must not be negative",

            // Campaign
            ErrorCode::InvalidCampaign => "Campaign parameters are invalid",
            ErrorCode::InvalidCampaignWindow => "Campaign must end after it starts",

            // Configuration
            ErrorCode::ConfigurationError => "Configuration error",
            ErrorCode::InvalidTierTable => "Fee tier table is invalid",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Pricing
            1001 => Ok(ErrorCode::UnknownCommissionRule),
            1002 => Ok(ErrorCode::UnknownPlan),
            1004 => Ok(ErrorCode::UnknownCategory),
            1005 => Ok(ErrorCode::NegativeSalePrice),

            // Campaign
            2001 => Ok(ErrorCode::InvalidCampaign),
            2002 => Ok(ErrorCode::InvalidCampaignWindow),

            // Configuration
            3001 => Ok(ErrorCode::ConfigurationError),
            3002 => Ok(ErrorCode::InvalidTierTable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::UnknownCommissionRule.code(), 1001);
        assert_eq!(ErrorCode::NegativeSalePrice.code(), 1005);
        assert_eq!(ErrorCode::InvalidCampaignWindow.code(), 2002);
        assert_eq!(ErrorCode::InvalidTierTable.code(), 3002);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::UnknownCommissionRule));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::InvalidCampaign));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        // Gaps inside a range are not codes either
        assert_eq!(ErrorCode::try_from(1003), Err(InvalidErrorCode(1003)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::UnknownPlan).unwrap();
        assert_eq!(json, "1002");

        let back: ErrorCode = serde_json::from_str("1002").unwrap();
        assert_eq!(back, ErrorCode::UnknownPlan);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::UnknownCategory.to_string(), "E1004");
    }

    #[test]
    fn test_category() {
        assert_eq!(ErrorCode::ValidationFailed.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NegativeSalePrice.category(), ErrorCategory::Pricing);
        assert_eq!(ErrorCode::InvalidCampaignWindow.category(), ErrorCategory::Campaign);
        assert_eq!(ErrorCode::InvalidTierTable.category(), ErrorCategory::Configuration);
    }
}
