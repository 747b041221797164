//! Listing price normalization
//!
//! Extracts a pack size from free-text listing titles and converts the shelf
//! price to a price per 500 g.

use lazy_static::lazy_static;
use regex::Regex;

use super::units::{ListingUnit, MatchRule, ParsedQuantity, CANONICAL_GRAMS};
use crate::models::Listing;

lazy_static! {
    // "250ml*24", "250 ML x 12"
    static ref MULTIPACK_UNIT_FIRST_RE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*(ml|ML)\s*[*×xX]\s*(\d+)").unwrap();
    // "24*250ml", "12 × 250ML"
    static ref MULTIPACK_COUNT_FIRST_RE: Regex =
        Regex::new(r"(\d+)\s*[*×xX]\s*(\d+(?:\.\d+)?)\s*(ml|ML)").unwrap();
    // "5kg", "500 g", "1.8L", "10斤", "５kg"
    static ref SINGLE_UNIT_RE: Regex =
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(kg|g|ml|l|斤|jin)").unwrap();
}

/// Code points of the zero digit for decimal digit runs seen in listing text.
/// Each run holds ten consecutive digits.
const DIGIT_ZEROS: &[u32] = &[
    0x0030,  // ASCII
    0x0660,  // Arabic-Indic
    0x06F0,  // Extended Arabic-Indic
    0x0966,  // Devanagari
    0x09E6,  // Bengali
    0x0E50,  // Thai
    0xFF10,  // Fullwidth
    0x1D7CE, // Mathematical bold
    0x1D7D8, // Mathematical double-struck
    0x1D7E2, // Mathematical sans-serif
    0x1D7EC, // Mathematical sans-serif bold
    0x1D7F6, // Mathematical monospace
];

fn digit_value(c: char) -> Option<char> {
    let code = u32::from(c);
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// Rewrite a matched number with ASCII digits so it can be parsed.
/// Returns None for digits outside the known runs.
fn ascii_number(matched: &str) -> Option<String> {
    matched
        .chars()
        .map(|c| if c == '.' { Some(c) } else { digit_value(c) })
        .collect()
}

fn parse_number<T: std::str::FromStr>(matched: &str) -> Option<T> {
    ascii_number(matched)?.parse().ok()
}

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extract the total quantity described by a listing text
///
/// Rules are tried in order and the first one that matches decides the
/// result, even when the quantity it produces is unusable.
///
/// Examples:
/// - "纯牛奶 250ml*24" -> 6000 g (multipack, unit first)
/// - "纯牛奶 24*250ml" -> 6000 g (multipack, count first)
/// - "东北大米 5kg" -> 5000 g
/// - "五花肉 2斤" -> 1000 g
pub fn parse_quantity(text: &str) -> Option<ParsedQuantity> {
    if let Some(caps) = MULTIPACK_UNIT_FIRST_RE.captures(text) {
        let per_unit: f64 = parse_number(&caps[1])?;
        let count: u32 = parse_number(&caps[3])?;
        return Some(multipack(per_unit, count, MatchRule::MultipackUnitFirst));
    }

    if let Some(caps) = MULTIPACK_COUNT_FIRST_RE.captures(text) {
        let count: u32 = parse_number(&caps[1])?;
        let per_unit: f64 = parse_number(&caps[2])?;
        return Some(multipack(per_unit, count, MatchRule::MultipackCountFirst));
    }

    let caps = SINGLE_UNIT_RE.captures(text)?;
    let value: f64 = parse_number(&caps[1])?;
    let unit = ListingUnit::from_token(&caps[2])?;

    Some(ParsedQuantity {
        grams: value * unit.grams_per_unit(),
        unit,
        count: 1,
        rule: MatchRule::SingleUnit,
    })
}

fn multipack(per_unit_ml: f64, count: u32, rule: MatchRule) -> ParsedQuantity {
    let unit = ListingUnit::Milliliter;
    ParsedQuantity {
        grams: per_unit_ml * unit.grams_per_unit() * f64::from(count),
        unit,
        count,
        rule,
    }
}

/// Convert a shelf price to a price per 500 g
///
/// Returns None when the price is not a positive finite number, when no
/// quantity can be read from the text, or when the quantity is zero.
pub fn normalize(price: f64, text: &str) -> Option<f64> {
    normalize_with_quantity(price, text).map(|(value, _)| value)
}

fn normalize_with_quantity(price: f64, text: &str) -> Option<(f64, ParsedQuantity)> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }

    let quantity = parse_quantity(text)?;
    if !quantity.grams.is_finite() || quantity.grams <= 0.0 {
        return None;
    }

    Some((round2(price / quantity.grams * CANONICAL_GRAMS), quantity))
}

/// A normalized price together with the listing it was derived from
#[derive(Debug, Clone)]
pub struct NormalizedListing<'a> {
    pub listing: &'a Listing,
    pub quantity: ParsedQuantity,
    /// Price per 500 g
    pub price_per_jin: f64,
}

/// Normalize a single listing, parsing its title and unit hint together
pub fn normalize_listing(listing: &Listing) -> Option<NormalizedListing<'_>> {
    let text = listing.parse_text();
    match normalize_with_quantity(listing.price, &text) {
        Some((price_per_jin, quantity)) => {
            tracing::trace!(
                "{} {}: {} g ({}{}) -> {:.2}/jin",
                listing.city,
                listing.keyword,
                quantity.grams,
                quantity.unit.as_str(),
                if quantity.count > 1 { " multipack" } else { "" },
                price_per_jin
            );
            Some(NormalizedListing {
                listing,
                quantity,
                price_per_jin,
            })
        }
        None => {
            tracing::debug!(
                "Unparsable listing in {}: '{}' at {}",
                listing.city,
                text,
                listing.price
            );
            None
        }
    }
}
