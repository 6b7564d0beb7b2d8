//! Shared types for the marketplace pricing workspace
//!
//! Common types used by the price engine and its callers: fee tier tables,
//! commission rules, pricing inputs/results, campaign parameters and the
//! unified error types.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
