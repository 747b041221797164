//! Index construction
//!
//! Prices a basket for every scraped city, maps cities to provinces, and
//! joins basket costs with the wage table into ranked index records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::basket::{aggregate, BasketBreakdown, CategoryPriceSet, PriceSource};
use crate::config::IndexConfig;
use crate::models::{group_by_city, sort_by_ranking, IndexRecord, Listing};

/// Where provinces without scraped listings get their basket price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasketMode {
    /// Per-province estimates, tier table for provinces without one
    #[default]
    Estimates,
    /// Tier table only
    Tiers,
}

/// Origin of a province's basket price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BasketSource {
    Scraped,
    Estimate,
    Tier,
}

impl BasketSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BasketSource::Scraped => "scraped",
            BasketSource::Estimate => "estimate",
            BasketSource::Tier => "tier",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub mode: BasketMode,
    /// Add real_wage / real_index and rank by real_index
    pub real_wage: bool,
}

/// Basket priced from one city's listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityBasket {
    pub city: String,
    pub province: String,
    pub breakdown: BasketBreakdown,
}

/// Builds index records from listings and the configured tables
pub struct IndexBuilder<'a> {
    config: &'a IndexConfig,
    options: BuildOptions,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(config: &'a IndexConfig, options: BuildOptions) -> Self {
        Self { config, options }
    }

    /// Price a basket for each city, in first-appearance order
    pub fn price_cities(&self, listings: &[Listing]) -> Vec<CityBasket> {
        group_by_city(listings)
            .into_iter()
            .map(|(city, items)| {
                let prices = CategoryPriceSet::from_listings(items.iter().copied());
                if prices.is_empty() {
                    tracing::warn!("{}: no usable listings, basket fully defaulted", city);
                }
                let outside = items
                    .iter()
                    .filter(|l| !self.config.composition.contains(&l.keyword))
                    .count();
                if outside > 0 {
                    tracing::debug!("{}: {} listings outside the basket", city, outside);
                }
                let breakdown =
                    aggregate(&prices, &self.config.composition, &self.config.defaults);
                let province = self.config.province_for_city(city).to_string();

                tracing::info!(
                    "{} -> {}: basket = {:.2} ({} listings)",
                    city,
                    province,
                    breakdown.cost,
                    items.len()
                );
                for line in breakdown.defaulted() {
                    match line.source {
                        PriceSource::Fallback => tracing::info!(
                            "  {}: no usable listings for {}, fallback price {:.2}",
                            city,
                            line.keyword,
                            line.price
                        ),
                        _ => tracing::info!(
                            "  {}: no usable listings for {}, default price {:.2}",
                            city,
                            line.keyword,
                            line.price
                        ),
                    }
                }

                CityBasket {
                    city: city.to_string(),
                    province,
                    breakdown,
                }
            })
            .collect()
    }

    /// Scraped basket cost per province
    ///
    /// When several cities map to one province the later city wins.
    pub fn scraped_baskets(&self, listings: &[Listing]) -> BTreeMap<String, f64> {
        let mut baskets = BTreeMap::new();
        for city_basket in self.price_cities(listings) {
            if city_basket.breakdown.cost <= 0.0 {
                tracing::warn!(
                    "{}: basket cost is zero, ignoring scraped data",
                    city_basket.city
                );
                continue;
            }
            if let Some(previous) =
                baskets.insert(city_basket.province.clone(), city_basket.breakdown.cost)
            {
                tracing::warn!(
                    "{}: replacing basket {:.2} for {} with {:.2}",
                    city_basket.city,
                    previous,
                    city_basket.province,
                    city_basket.breakdown.cost
                );
            }
        }
        baskets
    }

    /// Basket price for a province and where it came from
    pub fn basket_for(&self, province: &str, scraped: &BTreeMap<String, f64>) -> (f64, BasketSource) {
        if let Some(cost) = scraped.get(province) {
            return (*cost, BasketSource::Scraped);
        }
        if self.options.mode == BasketMode::Estimates {
            if let Some(estimate) = self.config.basket_estimates.get(province) {
                return (*estimate, BasketSource::Estimate);
            }
        }
        (self.config.tiers.basket_price(province), BasketSource::Tier)
    }

    /// One record per wage-table province, ranked by index descending
    pub fn build_records(&self, scraped: &BTreeMap<String, f64>) -> Vec<IndexRecord> {
        for province in scraped.keys() {
            if !self.config.wages.iter().any(|w| &w.name == province) {
                tracing::warn!("{}: scraped but not in the wage table, skipping", province);
            }
        }

        let mut records: Vec<IndexRecord> = self
            .config
            .wages
            .iter()
            .map(|entry| {
                let (basket_price, source) = self.basket_for(&entry.name, scraped);
                if source == BasketSource::Tier {
                    tracing::debug!(
                        "{}: wage {:.2}, basket {:.2} (tier {})",
                        entry.name,
                        entry.wage,
                        basket_price,
                        self.config.tiers.label_of(&entry.name)
                    );
                } else {
                    tracing::debug!(
                        "{}: wage {:.2}, basket {:.2} ({})",
                        entry.name,
                        entry.wage,
                        basket_price,
                        source.as_str()
                    );
                }
                let record = IndexRecord::new(entry.name.as_str(), entry.wage, basket_price);
                if self.options.real_wage {
                    record.with_real_wage(self.config.real_wage_multiplier)
                } else {
                    record
                }
            })
            .collect();

        sort_by_ranking(&mut records);
        records
    }

    /// Full pipeline: listings (if any) to ranked records
    pub fn build(&self, listings: Option<&[Listing]>) -> Vec<IndexRecord> {
        let scraped = match listings {
            Some(listings) => self.scraped_baskets(listings),
            None => BTreeMap::new(),
        };
        tracing::info!(
            "Building index for {} provinces ({} from listings)",
            self.config.wages.len(),
            scraped.len()
        );
        self.build_records(&scraped)
    }
}
