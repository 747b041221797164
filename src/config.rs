//! Index configuration
//!
//! Wage tables, basket estimates, basket composition and default prices.
//! Built-in values can be overridden field by field from a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::basket::{BasketComposition, DefaultPrices};
use crate::index::TierTable;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Minimum hourly wage for one province
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceWage {
    pub name: String,
    /// Yuan per hour
    pub wage: f64,
}

/// Multiplier from official wage to what low-income workers actually earn per hour
pub const REAL_WAGE_MULTIPLIER: f64 = 0.45;

/// All static tables the index is computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Provinces in output order before ranking
    pub wages: Vec<ProvinceWage>,
    /// Estimated basket price per province when no listings were captured
    pub basket_estimates: BTreeMap<String, f64>,
    /// Scraped city to the province it represents
    pub city_provinces: BTreeMap<String, String>,
    pub composition: BasketComposition,
    #[serde(flatten)]
    pub defaults: DefaultPrices,
    pub real_wage_multiplier: f64,
    #[serde(flatten)]
    pub tiers: TierTable,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            wages: default_wages(),
            basket_estimates: default_basket_estimates(),
            city_provinces: default_city_provinces(),
            composition: BasketComposition::default(),
            defaults: DefaultPrices::default(),
            real_wage_multiplier: REAL_WAGE_MULTIPLIER,
            tiers: TierTable::default(),
        }
    }
}

impl IndexConfig {
    /// Load a config file. Fields missing from the file keep built-in values.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|e| match e {
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config JSON
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use built-in tables
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check the invariants the index computation relies on
    pub fn validate(&self) -> ConfigResult<()> {
        if self.wages.is_empty() {
            return Err(ConfigError::Invalid("wage table is empty".to_string()));
        }
        for entry in &self.wages {
            require_positive(&format!("wage for {}", entry.name), entry.wage)?;
        }
        for (province, price) in &self.basket_estimates {
            require_positive(&format!("basket estimate for {}", province), *price)?;
        }
        for item in self.composition.items() {
            if !item.weight.is_finite() || item.weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "weight for {} must be non-negative, got {}",
                    item.keyword, item.weight
                )));
            }
        }
        for (keyword, price) in &self.defaults.prices {
            require_positive(&format!("default price for {}", keyword), *price)?;
        }
        require_positive("fallback price", self.defaults.fallback)?;
        require_positive("real wage multiplier", self.real_wage_multiplier)?;
        for tier in &self.tiers.tiers {
            require_positive(&format!("basket price for tier {}", tier.label), tier.basket_price)?;
        }
        require_positive("tier default price", self.tiers.default_price)?;
        Ok(())
    }

    /// Province a scraped city stands for; unmapped cities are used as-is
    pub fn province_for_city<'a>(&'a self, city: &'a str) -> &'a str {
        self.city_provinces
            .get(city)
            .map(String::as_str)
            .unwrap_or(city)
    }
}

fn require_positive(what: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be positive, got {}",
            what, value
        )))
    }
}

// ============================================================================
// Built-in Tables
// ============================================================================

/// Minimum hourly wages (yuan/hour), 2024 standards
fn default_wages() -> Vec<ProvinceWage> {
    [
        ("北京", 26.0), ("天津", 22.0), ("上海", 24.0), ("重庆", 21.0),
        ("河北", 19.0), ("山西", 18.0), ("辽宁", 19.0), ("吉林", 18.0),
        ("黑龙江", 18.0), ("江苏", 22.0), ("浙江", 23.0), ("安徽", 19.0),
        ("福建", 21.0), ("江西", 18.0), ("山东", 20.0), ("河南", 18.0),
        ("湖北", 20.0), ("湖南", 19.0), ("广东", 22.0), ("海南", 19.0),
        ("四川", 21.0), ("贵州", 18.0), ("云南", 18.0), ("西藏", 19.0),
        ("陕西", 19.0), ("甘肃", 17.0), ("青海", 18.0), ("宁夏", 18.0),
        ("新疆", 19.0), ("内蒙古", 19.0), ("广西", 18.0),
    ]
    .into_iter()
    .map(|(name, wage)| ProvinceWage {
        name: name.to_string(),
        wage,
    })
    .collect()
}

/// Basket price estimates (yuan) for every province
fn default_basket_estimates() -> BTreeMap<String, f64> {
    [
        ("北京", 20.5), ("天津", 17.8), ("上海", 19.2), ("重庆", 16.5),
        ("河北", 14.5), ("山西", 14.2), ("辽宁", 13.0), ("吉林", 12.5),
        ("黑龙江", 12.0), ("江苏", 16.0), ("浙江", 17.5), ("安徽", 14.0),
        ("福建", 16.8), ("江西", 15.0), ("山东", 14.8), ("河南", 14.5),
        ("湖北", 15.2), ("湖南", 15.5), ("广东", 17.0), ("海南", 18.5),
        ("四川", 15.8), ("贵州", 16.0), ("云南", 15.5), ("西藏", 21.0),
        ("陕西", 15.0), ("甘肃", 14.0), ("青海", 17.0), ("宁夏", 15.5),
        ("新疆", 15.8), ("内蒙古", 13.5), ("广西", 16.2),
    ]
    .into_iter()
    .map(|(name, price)| (name.to_string(), price))
    .collect()
}

fn default_city_provinces() -> BTreeMap<String, String> {
    [("沈阳", "辽宁"), ("上海", "上海"), ("成都", "四川"), ("深圳", "广东")]
        .into_iter()
        .map(|(city, province)| (city.to_string(), province.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basket::{OIL, PORK};

    #[test]
    fn test_default_tables_cover_all_provinces() {
        let config = IndexConfig::default();
        assert_eq!(config.wages.len(), 31);
        for entry in &config.wages {
            assert!(
                config.basket_estimates.contains_key(&entry.name),
                "missing estimate for {}",
                entry.name
            );
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_province_for_city() {
        let config = IndexConfig::default();
        assert_eq!(config.province_for_city("沈阳"), "辽宁");
        assert_eq!(config.province_for_city("深圳"), "广东");
        assert_eq!(config.province_for_city("武汉"), "武汉");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = IndexConfig::from_json(
            r#"{
                "wages": [{"name": "辽宁", "wage": 22.0}],
                "fallback_price": 12.0,
                "tier_default_price": 13.0
            }"#,
        )
        .unwrap();
        assert_eq!(config.wages.len(), 1);
        assert_eq!(config.defaults.fallback, 12.0);
        assert_eq!(config.defaults.prices.get(PORK), Some(&15.0));
        assert_eq!(config.composition.weight_of(OIL), Some(0.5));
        assert_eq!(config.tiers.default_price, 13.0);
        assert_eq!(config.tiers.basket_price("辽宁"), 11.9);
        assert_eq!(config.real_wage_multiplier, 0.45);
    }

    #[test]
    fn test_json_overrides_composition() {
        let config = IndexConfig::from_json(
            r#"{"composition": [{"keyword": "五花肉", "weight": 2.0}]}"#,
        )
        .unwrap();
        assert_eq!(config.composition.items().len(), 1);
        assert_eq!(config.composition.weight_of(PORK), Some(2.0));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = IndexConfig::from_json(
            r#"{"composition": [{"keyword": "五花肉", "weight": -1.0}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_empty_wages() {
        let err = IndexConfig::from_json(r#"{"wages": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_estimate() {
        let err = IndexConfig::from_json(r#"{"basket_estimates": {"北京": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = IndexConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"real_wage_multiplier": -2}"#).unwrap();
        assert!(matches!(
            IndexConfig::load(&path).unwrap_err(),
            ConfigError::Invalid(_)
        ));

        let missing = dir.path().join("missing.json");
        match IndexConfig::load(&missing).unwrap_err() {
            ConfigError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {}", other),
        }
    }
}
