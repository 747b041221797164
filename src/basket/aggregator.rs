//! Basket cost aggregation
//!
//! Reduces per-category normalized prices for one region to a single
//! basket cost. Aggregation never fails: categories without observations
//! are priced from the defaults table.

use std::collections::BTreeMap;

use serde::Serialize;

use super::composition::{BasketComposition, DefaultPrices, PriceSource};
use crate::models::Listing;
use crate::pricing::{normalize_listing, round2};

/// Normalized prices per category for one region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPriceSet {
    prices: BTreeMap<String, Vec<f64>>,
}

impl CategoryPriceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one normalized price for a category
    pub fn push(&mut self, keyword: impl Into<String>, price_per_jin: f64) {
        self.prices.entry(keyword.into()).or_default().push(price_per_jin);
    }

    /// Normalize listings and collect the usable prices by keyword
    ///
    /// Listings whose text cannot be parsed, or whose normalized price
    /// rounds to zero, are skipped.
    pub fn from_listings<'a, I>(listings: I) -> Self
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        let mut set = Self::new();
        for listing in listings {
            if let Some(normalized) = normalize_listing(listing) {
                if normalized.price_per_jin > 0.0 {
                    set.push(listing.keyword.as_str(), normalized.price_per_jin);
                }
            }
        }
        set
    }

    pub fn get(&self, keyword: &str) -> &[f64] {
        self.prices.get(keyword).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.prices.values().all(Vec::is_empty)
    }
}

/// Lower median: the element at index len / 2 after sorting ascending
pub fn lower_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}

/// Pricing of one basket category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketLine {
    pub keyword: String,
    pub weight: f64,
    /// Representative price per jin
    pub price: f64,
    #[serde(flatten)]
    pub source: PriceSource,
}

impl BasketLine {
    pub fn cost(&self) -> f64 {
        self.price * self.weight
    }

    pub fn is_defaulted(&self) -> bool {
        !matches!(self.source, PriceSource::Observed { .. })
    }
}

/// Basket cost with its per-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketBreakdown {
    /// Weighted sum of representative prices, rounded to 2 decimals
    pub cost: f64,
    pub lines: Vec<BasketLine>,
}

impl BasketBreakdown {
    /// Categories priced from defaults rather than observations
    pub fn defaulted(&self) -> impl Iterator<Item = &BasketLine> {
        self.lines.iter().filter(|line| line.is_defaulted())
    }
}

/// Price the basket for one region
pub fn aggregate(
    prices: &CategoryPriceSet,
    composition: &BasketComposition,
    defaults: &DefaultPrices,
) -> BasketBreakdown {
    let lines: Vec<BasketLine> = composition
        .items()
        .iter()
        .map(|item| {
            let observed = prices.get(&item.keyword);
            let (price, source) = match lower_median(observed) {
                Some(median) => (
                    median,
                    PriceSource::Observed {
                        count: observed.len(),
                    },
                ),
                None => defaults.price_for(&item.keyword),
            };
            BasketLine {
                keyword: item.keyword.clone(),
                weight: item.weight,
                price,
                source,
            }
        })
        .collect();

    let total: f64 = lines.iter().map(BasketLine::cost).sum();

    BasketBreakdown {
        cost: round2(total.max(0.0)),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::composition::{BasketItem, EGGS, MILK, OIL, PORK, RICE};

    fn listing(keyword: &str, title: &str, price: f64) -> Listing {
        Listing {
            city: "沈阳".to_string(),
            keyword: keyword.to_string(),
            product_name: title.to_string(),
            price,
            unit: String::new(),
        }
    }

    #[test]
    fn test_lower_median_even_count() {
        assert_eq!(lower_median(&[3.0, 5.0, 4.0, 6.0]), Some(5.0));
    }

    #[test]
    fn test_lower_median_odd_count() {
        assert_eq!(lower_median(&[9.0, 1.0, 4.0]), Some(4.0));
        assert_eq!(lower_median(&[7.5]), Some(7.5));
    }

    #[test]
    fn test_lower_median_empty() {
        assert_eq!(lower_median(&[]), None);
    }

    #[test]
    fn test_all_empty_uses_defaults() {
        let breakdown = aggregate(
            &CategoryPriceSet::new(),
            &BasketComposition::default(),
            &DefaultPrices::default(),
        );
        // 15 + 6 + 3 + 6 * 0.5 + 5
        assert_eq!(breakdown.cost, 32.0);
        assert_eq!(breakdown.defaulted().count(), 5);
        assert!(breakdown
            .lines
            .iter()
            .all(|line| line.source == PriceSource::Default));
    }

    #[test]
    fn test_missing_default_uses_fallback() {
        let composition = BasketComposition::new(vec![BasketItem {
            keyword: "可乐".to_string(),
            weight: 2.0,
        }]);
        let breakdown = aggregate(
            &CategoryPriceSet::new(),
            &composition,
            &DefaultPrices::default(),
        );
        assert_eq!(breakdown.cost, 20.0);
        assert_eq!(breakdown.lines[0].source, PriceSource::Fallback);
    }

    #[test]
    fn test_observed_and_defaulted_mix() {
        let mut prices = CategoryPriceSet::new();
        for p in [3.0, 5.0, 4.0, 6.0] {
            prices.push(PORK, p);
        }
        prices.push(MILK, 4.0);

        let breakdown = aggregate(&prices, &BasketComposition::default(), &DefaultPrices::default());
        // pork 5 + eggs 6 + rice 3 + oil 6 * 0.5 + milk 4
        assert_eq!(breakdown.cost, 21.0);
        assert_eq!(
            breakdown.lines[0].source,
            PriceSource::Observed { count: 4 }
        );
        let defaulted: Vec<&str> = breakdown.defaulted().map(|l| l.keyword.as_str()).collect();
        assert_eq!(defaulted, vec![EGGS, RICE, OIL]);
    }

    #[test]
    fn test_observation_order_does_not_matter() {
        let mut a = CategoryPriceSet::new();
        let mut b = CategoryPriceSet::new();
        for p in [6.0, 3.0, 5.0, 4.0] {
            a.push(RICE, p);
        }
        for p in [4.0, 5.0, 3.0, 6.0] {
            b.push(RICE, p);
        }
        let composition = BasketComposition::default();
        let defaults = DefaultPrices::default();
        assert_eq!(
            aggregate(&a, &composition, &defaults),
            aggregate(&b, &composition, &defaults)
        );
    }

    #[test]
    fn test_rounds_once_at_the_end() {
        let composition = BasketComposition::new(
            ["a", "b", "c"]
                .iter()
                .map(|k| BasketItem {
                    keyword: k.to_string(),
                    weight: 1.0,
                })
                .collect(),
        );
        let mut prices = CategoryPriceSet::new();
        for k in ["a", "b", "c"] {
            prices.push(k, 0.333);
        }
        let breakdown = aggregate(&prices, &composition, &DefaultPrices::default());
        // 0.999 rounds to 1.00; rounding each line first would give 0.99
        assert_eq!(breakdown.cost, 1.0);
    }

    #[test]
    fn test_from_listings_skips_unparsable() {
        let listings = vec![
            listing(RICE, "东北珍珠大米 5kg", 30.0),
            listing(RICE, "五常稻花香大米", 50.0),
            listing(EGGS, "农家散养土鸡蛋 10枚", 8.0),
            listing(OIL, "金龙鱼大豆油 5L", 0.0),
        ];
        let set = CategoryPriceSet::from_listings(&listings);
        assert_eq!(set.get(RICE), &[3.0]);
        assert!(set.get(EGGS).is_empty());
        assert!(set.get(OIL).is_empty());
        assert!(!set.is_empty());
    }

    #[test]
    fn test_end_to_end_basket() {
        let listings = vec![
            listing(PORK, "精选五花肉 鲜切 5kg", 150.0),   // 15.00
            listing(PORK, "国产猪五花肉 去皮 500g", 14.0), // 14.00
            listing(PORK, "冷鲜五花肉 带皮 1kg", 32.0),    // 16.00
            listing(EGGS, "新鲜散装鸡蛋 500g", 6.5),       // 6.50
            listing(RICE, "东北珍珠大米 10kg", 60.0),      // 3.00
            listing(RICE, "东北长粒香大米 2.5kg", 20.0),   // 4.00
            listing(OIL, "金龙鱼精炼一级大豆油 5L", 60.0), // 6.00
            listing(MILK, "伊利纯牛奶 250ml*24", 60.0),    // 5.00
        ];
        let set = CategoryPriceSet::from_listings(&listings);
        let breakdown = aggregate(&set, &BasketComposition::default(), &DefaultPrices::default());

        // pork median of [14, 15, 16] = 15, rice lower median of [3, 4] = 4
        // 15 + 6.5 + 4 + 6 * 0.5 + 5
        assert_eq!(breakdown.cost, 33.5);
        assert_eq!(breakdown.defaulted().count(), 0);

        let index = round2(22.0 / breakdown.cost);
        assert_eq!(index, 0.66);
    }
}
