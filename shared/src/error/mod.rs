//! Unified error system for the pricing workspace
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Pricing errors
//! - 2xxx: Campaign errors
//! - 3xxx: Configuration errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::UnknownPlan);
//!
//! // Create an error with details
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "quantity must be at least 1")
//!     .with_detail("field", "quantity");
//! assert_eq!(err.code.code(), 2);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
