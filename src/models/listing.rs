//! Listing model
//!
//! One product offer captured from a supermarket search page.

use serde::{Deserialize, Serialize};

/// A captured product offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// City the offer was observed in
    pub city: String,
    /// Search keyword, doubles as the basket category
    pub keyword: String,
    pub product_name: String,
    /// Shelf price in yuan
    pub price: f64,
    /// Pack size hint such as "5kg" or "250ml*24"
    #[serde(default)]
    pub unit: String,
}

impl Listing {
    /// Text used for quantity parsing: title followed by the unit hint
    pub fn parse_text(&self) -> String {
        format!("{} {}", self.product_name, self.unit)
    }
}

/// Group listings by city, keeping cities in first-appearance order
pub fn group_by_city(listings: &[Listing]) -> Vec<(&str, Vec<&Listing>)> {
    let mut groups: Vec<(&str, Vec<&Listing>)> = Vec::new();

    for listing in listings {
        match groups.iter_mut().find(|(city, _)| *city == listing.city) {
            Some((_, items)) => items.push(listing),
            None => groups.push((listing.city.as_str(), vec![listing])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(city: &str, keyword: &str) -> Listing {
        Listing {
            city: city.to_string(),
            keyword: keyword.to_string(),
            product_name: format!("{} 500g", keyword),
            price: 10.0,
            unit: String::new(),
        }
    }

    #[test]
    fn test_deserialize_without_unit() {
        let json = r#"{"city":"上海","keyword":"五花肉","product_name":"精选五花肉 500g","price":19.5}"#;
        let l: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(l.unit, "");
        assert_eq!(l.price, 19.5);
    }

    #[test]
    fn test_deserialize_ignores_rank() {
        let json = r#"{"city":"上海","keyword":"五花肉","rank":2,"product_name":"x","price":1,"unit":"1kg"}"#;
        let l: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(l.unit, "1kg");
    }

    #[test]
    fn test_deserialize_rejects_missing_price() {
        let json = r#"{"city":"上海","keyword":"五花肉","product_name":"x"}"#;
        assert!(serde_json::from_str::<Listing>(json).is_err());
    }

    #[test]
    fn test_parse_text_joins_with_space() {
        let mut l = listing("成都", "纯牛奶");
        l.product_name = "伊利纯牛奶".to_string();
        l.unit = "250ml*12".to_string();
        assert_eq!(l.parse_text(), "伊利纯牛奶 250ml*12");
    }

    #[test]
    fn test_group_by_city_keeps_order() {
        let listings = vec![
            listing("深圳", "五花肉"),
            listing("沈阳", "五花肉"),
            listing("深圳", "纯牛奶"),
        ];
        let groups = group_by_city(&listings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "深圳");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "沈阳");
    }
}
