//! Price Resolution Module
//!
//! Fee lookup, commission resolution, forward pricing, margin solving and
//! campaign adjustment. Everything here is synchronous and deterministic.

mod campaign;
pub mod commission;
mod engine;
pub mod fees;
mod forward;
pub mod money;
mod simulator;
mod solver;
pub mod validation;

pub use campaign::*;
pub use engine::*;
pub use fees::MarketplaceFees;
pub use forward::*;
pub use simulator::*;
pub use solver::*;
