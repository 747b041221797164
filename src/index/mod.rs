//! Purchasing power index module
//!
//! Combines basket costs with wages into ranked province records.

pub mod builder;
pub mod tiers;

pub use builder::{BasketMode, BasketSource, BuildOptions, CityBasket, IndexBuilder};
pub use tiers::{Tier, TierTable, TIER_DEFAULT_PRICE};
