//! Basket composition and default prices
//!
//! The fixed grocery basket: which categories it holds, how many jin of
//! each, and what to charge for a category nobody observed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const PORK: &str = "五花肉";
pub const EGGS: &str = "散装鸡蛋";
pub const RICE: &str = "东北大米";
pub const OIL: &str = "金龙鱼大豆油";
pub const MILK: &str = "纯牛奶";

/// Price used for a category missing from the defaults table
pub const FALLBACK_PRICE: f64 = 10.0;

/// One basket category and its weight in jin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    pub keyword: String,
    pub weight: f64,
}

/// Ordered basket categories. Aggregation walks them in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasketComposition {
    items: Vec<BasketItem>,
}

impl BasketComposition {
    pub fn new(items: Vec<BasketItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    pub fn weight_of(&self, keyword: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.keyword == keyword)
            .map(|item| item.weight)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.weight_of(keyword).is_some()
    }
}

impl Default for BasketComposition {
    fn default() -> Self {
        let item = |keyword: &str, weight: f64| BasketItem {
            keyword: keyword.to_string(),
            weight,
        };
        Self::new(vec![
            item(PORK, 1.0),
            item(EGGS, 1.0),
            item(RICE, 1.0),
            item(OIL, 0.5),
            item(MILK, 1.0),
        ])
    }
}

/// Where a category's representative price came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum PriceSource {
    /// Lower median of this many observations
    Observed { count: usize },
    /// Category default from the defaults table
    Default,
    /// Universal fallback price
    Fallback,
}

/// Per-category default prices, per jin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultPrices {
    #[serde(rename = "default_prices")]
    pub prices: BTreeMap<String, f64>,
    #[serde(rename = "fallback_price")]
    pub fallback: f64,
}

impl DefaultPrices {
    /// Default price for a category, falling back to the universal price
    pub fn price_for(&self, keyword: &str) -> (f64, PriceSource) {
        match self.prices.get(keyword) {
            Some(price) => (*price, PriceSource::Default),
            None => (self.fallback, PriceSource::Fallback),
        }
    }
}

impl Default for DefaultPrices {
    fn default() -> Self {
        let prices = [(PORK, 15.0), (EGGS, 6.0), (RICE, 3.0), (OIL, 6.0), (MILK, 5.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            prices,
            fallback: FALLBACK_PRICE,
        }
    }
}
