//! Marketplace Price Resolution Engine
//!
//! Determines the sale price of a marketplace listing from its cost basis,
//! tiered marketplace fees and either a desired margin or an explicit price.
//! Fees are step functions of the price, so solving for a margin is a bounded
//! fixed-point iteration rather than a single division.
//!
//! # Module layout
//!
//! ```text
//! price-engine/src/
//! ├── core/      # configuration, errors
//! ├── pricing/   # fee lookup, forward pricer, solver, campaigns, simulator
//! └── utils/     # logging
//! ```
//!
//! # Example
//!
//! ```ignore
//! let tables = Arc::new(MarketplaceTables::from_json_str(&json)?);
//! let engine = PriceEngine::from_config(tables, &EngineConfig::from_env())?;
//! let quote = engine.quote_listing(&request, &store)?;
//! ```

pub mod core;
pub mod pricing;
pub mod utils;

pub use self::core::{EngineConfig, EngineResult, PricingError};
pub use pricing::{
    CampaignAdjuster, ForwardPricer, MarginSolver, PriceEngine, SolverSettings,
    simulate_cost_change,
};
pub use utils::logger::init_logger;
