//! Engine error type
//!
//! Every failure the engine can raise. Infeasible margins are not errors: they
//! come back as a zero-price result flagged `ResolutionStatus::InfeasibleMargin`.

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Rejected before any computation; the caller shows it on `field`
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Invalid sale_price: must be non-negative, got {0}")]
    NegativeSalePrice(f64),

    /// Requested rule key has no entry; never defaults to 0%
    #[error("Commission rule not found: {0}")]
    UnknownCommissionRule(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Pricing category not found: {0}")]
    UnknownCategory(String),

    #[error("Invalid campaign: {0}")]
    InvalidCampaign(String),

    #[error("Invalid campaign window: {0}")]
    InvalidCampaignWindow(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type EngineResult<T> = Result<T, PricingError>;

impl PricingError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::ValidationFailed,
            Self::NegativeSalePrice(_) => ErrorCode::NegativeSalePrice,
            Self::UnknownCommissionRule(_) => ErrorCode::UnknownCommissionRule,
            Self::UnknownPlan(_) => ErrorCode::UnknownPlan,
            Self::UnknownCategory(_) => ErrorCode::UnknownCategory,
            Self::InvalidCampaign(_) => ErrorCode::InvalidCampaign,
            Self::InvalidCampaignWindow(_) => ErrorCode::InvalidCampaignWindow,
            Self::Configuration(_) => ErrorCode::ConfigurationError,
        }
    }
}

impl From<shared::models::UnknownPlan> for PricingError {
    fn from(err: shared::models::UnknownPlan) -> Self {
        Self::UnknownPlan(err.0)
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        let code = err.error_code();
        let message = err.to_string();
        match err {
            PricingError::InvalidInput { field, .. } => {
                AppError::with_message(code, message).with_detail("field", field)
            }
            PricingError::NegativeSalePrice(_) => {
                AppError::with_message(code, message).with_detail("field", "sale_price")
            }
            PricingError::UnknownCommissionRule(key) => AppError::unknown_commission_rule(key),
            PricingError::UnknownPlan(plan) => {
                AppError::with_message(code, message).with_detail("plan", plan)
            }
            PricingError::UnknownCategory(name) => {
                AppError::with_message(code, message).with_detail("category", name)
            }
            PricingError::InvalidCampaign(_) => AppError::invalid_campaign(message),
            PricingError::InvalidCampaignWindow(_) => AppError::with_message(code, message),
            PricingError::Configuration(_) => AppError::configuration(message),
        }
    }
}
