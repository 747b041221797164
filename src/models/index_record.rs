//! Index record model
//!
//! One row of the published purchasing power dataset.

use serde::{Deserialize, Serialize};

use crate::pricing::round2;

/// Purchasing power for one province
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub name: String,
    /// Minimum hourly wage, yuan
    pub wage: f64,
    /// Basket cost, yuan
    pub basket_price: f64,
    /// wage / basket_price
    pub index: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_wage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_index: Option<f64>,
}

impl IndexRecord {
    pub fn new(name: impl Into<String>, wage: f64, basket_price: f64) -> Self {
        Self {
            name: name.into(),
            wage,
            basket_price,
            index: round2(wage / basket_price),
            real_wage: None,
            real_index: None,
        }
    }

    /// Add real wage fields using the given wage multiplier
    pub fn with_real_wage(mut self, multiplier: f64) -> Self {
        let real_wage = round2(self.wage * multiplier);
        self.real_wage = Some(real_wage);
        self.real_index = Some(round2(real_wage / self.basket_price));
        self
    }

    /// The index used for ranking: real index when present
    pub fn ranking_index(&self) -> f64 {
        self.real_index.unwrap_or(self.index)
    }
}

/// Sort descending by ranking index. Ties keep their current order.
pub fn sort_by_ranking(records: &mut [IndexRecord]) {
    records.sort_by(|a, b| b.ranking_index().total_cmp(&a.ranking_index()));
}
