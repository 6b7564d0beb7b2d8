//! Data models shared between the engine and its callers
//!
//! All records are transient: built per calculation from caller data.
//! Tier tables and commission rules are immutable once loaded.

pub mod campaign;
pub mod commission;
pub mod fee_schedule;
pub mod listing;
pub mod pricing;
pub mod product;
pub mod simulation;
pub mod store;
pub mod tables;

pub use campaign::*;
pub use commission::*;
pub use fee_schedule::*;
pub use listing::*;
pub use pricing::*;
pub use product::*;
pub use simulation::*;
pub use store::*;
pub use tables::*;
