//! Regional Purchasing Power (RPP) Library
//!
//! Normalizes supermarket listings to a per-jin price, prices a fixed
//! grocery basket per region, and ranks provinces by wage per basket.

pub mod basket;
pub mod build_info;
pub mod config;
pub mod index;
pub mod models;
pub mod pricing;
pub mod report;
pub mod store;
