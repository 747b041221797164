//! Unit types and conversion constants
//!
//! Units that appear on supermarket listings and their gram equivalents.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants (to grams)
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per liter, assuming the density of water
pub const G_PER_LITER: f64 = 1000.0;
/// Grams per milliliter, assuming the density of water
pub const G_PER_ML: f64 = 1.0;
/// Grams per jin (斤)
pub const G_PER_JIN: f64 = 500.0;
/// Size of the canonical pricing unit in grams (one jin)
pub const CANONICAL_GRAMS: f64 = 500.0;

/// A unit recognized on a product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingUnit {
    Kilogram,
    Gram,
    Milliliter,
    Liter,
    /// 斤, half a kilogram
    Jin,
}

impl ListingUnit {
    /// Resolve a matched unit token. Latin tokens are case-insensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "kg" => Some(ListingUnit::Kilogram),
            "g" => Some(ListingUnit::Gram),
            "ml" => Some(ListingUnit::Milliliter),
            "l" => Some(ListingUnit::Liter),
            "斤" | "jin" => Some(ListingUnit::Jin),
            _ => None,
        }
    }

    /// Conversion factor to grams
    pub fn grams_per_unit(&self) -> f64 {
        match self {
            ListingUnit::Kilogram => G_PER_KG,
            ListingUnit::Gram => 1.0,
            ListingUnit::Milliliter => G_PER_ML,
            ListingUnit::Liter => G_PER_LITER,
            ListingUnit::Jin => G_PER_JIN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingUnit::Kilogram => "kg",
            ListingUnit::Gram => "g",
            ListingUnit::Milliliter => "ml",
            ListingUnit::Liter => "l",
            ListingUnit::Jin => "斤",
        }
    }
}

/// Which parsing rule produced a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// "250ml*24"
    MultipackUnitFirst,
    /// "24*250ml"
    MultipackCountFirst,
    /// "5kg", "900ml", "10斤"
    SingleUnit,
}

/// A quantity extracted from listing text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParsedQuantity {
    /// Total weight in grams (volumes converted 1:1)
    pub grams: f64,
    pub unit: ListingUnit,
    /// Pack count, 1 for single-unit matches
    pub count: u32,
    pub rule: MatchRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_case_insensitive() {
        assert_eq!(ListingUnit::from_token("KG"), Some(ListingUnit::Kilogram));
        assert_eq!(ListingUnit::from_token("Kg"), Some(ListingUnit::Kilogram));
        assert_eq!(ListingUnit::from_token("G"), Some(ListingUnit::Gram));
        assert_eq!(ListingUnit::from_token("ML"), Some(ListingUnit::Milliliter));
        assert_eq!(ListingUnit::from_token("L"), Some(ListingUnit::Liter));
        assert_eq!(ListingUnit::from_token("JIN"), Some(ListingUnit::Jin));
        assert_eq!(ListingUnit::from_token("斤"), Some(ListingUnit::Jin));
    }

    #[test]
    fn test_from_token_unknown() {
        assert_eq!(ListingUnit::from_token("枚"), None);
        assert_eq!(ListingUnit::from_token("oz"), None);
        assert_eq!(ListingUnit::from_token(""), None);
    }

    #[test]
    fn test_grams_per_unit() {
        assert_eq!(ListingUnit::Kilogram.grams_per_unit(), 1000.0);
        assert_eq!(ListingUnit::Gram.grams_per_unit(), 1.0);
        assert_eq!(ListingUnit::Milliliter.grams_per_unit(), 1.0);
        assert_eq!(ListingUnit::Liter.grams_per_unit(), 1000.0);
        assert_eq!(ListingUnit::Jin.grams_per_unit(), 500.0);
    }
}
