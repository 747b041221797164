//! Regional tier classification
//!
//! Basket prices estimated from a coarse regional classification, used for
//! provinces without observed listings.

use serde::{Deserialize, Serialize};

/// Basket price for provinces not in any tier
pub const TIER_DEFAULT_PRICE: f64 = 14.5;

/// A group of provinces sharing one estimated basket price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub label: String,
    pub basket_price: f64,
    pub provinces: Vec<String>,
}

/// Ordered tier list. A province belongs to the first tier listing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub tiers: Vec<Tier>,
    #[serde(rename = "tier_default_price")]
    pub default_price: f64,
}

impl TierTable {
    pub fn tier_of(&self, province: &str) -> Option<&Tier> {
        self.tiers
            .iter()
            .find(|tier| tier.provinces.iter().any(|p| p == province))
    }

    /// Estimated basket price for a province
    pub fn basket_price(&self, province: &str) -> f64 {
        self.tier_of(province)
            .map(|tier| tier.basket_price)
            .unwrap_or(self.default_price)
    }

    /// Tier label for display, "Other" when unclassified
    pub fn label_of(&self, province: &str) -> &str {
        self.tier_of(province)
            .map(|tier| tier.label.as_str())
            .unwrap_or("Other")
    }
}

impl Default for TierTable {
    fn default() -> Self {
        let tier = |label: &str, basket_price: f64, provinces: &[&str]| Tier {
            label: label.to_string(),
            basket_price,
            provinces: provinces.iter().map(|p| p.to_string()).collect(),
        };
        Self {
            tiers: vec![
                // base 18 +20%
                tier("Tier-1", 21.6, &["北京", "上海", "广东"]),
                // base 14 -15%
                tier("Northeast", 11.9, &["辽宁", "吉林", "黑龙江"]),
                // base 18 +40%
                tier("Remote", 25.2, &["西藏", "青海", "新疆"]),
                tier("Developed", 16.5, &["江苏", "浙江", "福建", "天津", "山东"]),
                tier("Central", 15.0, &["湖北", "湖南", "河南", "四川", "重庆", "陕西"]),
            ],
            default_price: TIER_DEFAULT_PRICE,
        }
    }
}
