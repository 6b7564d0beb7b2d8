//! Core module: engine configuration and error definitions
//!
//! - [`EngineConfig`] - environment configuration
//! - [`PricingError`] - engine error type

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::{EngineResult, PricingError};
