//! Error category classification

use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Pricing errors
/// - 2xxx: Campaign errors
/// - 3xxx and above: Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Pricing errors (1xxx)
    Pricing,
    /// Campaign errors (2xxx)
    Campaign,
    /// Configuration errors (3xxx)
    Configuration,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Pricing,
            2000..3000 => Self::Campaign,
            _ => Self::Configuration,
        }
    }

    /// Whether errors of this category are caused by caller input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Configuration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_ranges() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1000), ErrorCategory::Pricing);
        assert_eq!(ErrorCategory::from_code(2500), ErrorCategory::Campaign);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Configuration);
    }

    #[test]
    fn test_client_error() {
        assert!(ErrorCategory::Pricing.is_client_error());
        assert!(ErrorCategory::Campaign.is_client_error());
        assert!(!ErrorCategory::Configuration.is_client_error());
    }
}
