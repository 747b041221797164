//! Price normalization module
//!
//! Reads pack sizes out of listing text and converts shelf prices to a
//! common per-jin basis.

pub mod normalizer;
pub mod units;

pub use normalizer::{normalize, normalize_listing, parse_quantity, round2, NormalizedListing};
pub use units::{ListingUnit, MatchRule, ParsedQuantity, CANONICAL_GRAMS};
