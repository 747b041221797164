//! Basket pricing module
//!
//! Turns normalized category prices into a single basket cost.

pub mod aggregator;
pub mod composition;

pub use aggregator::{aggregate, lower_median, BasketBreakdown, BasketLine, CategoryPriceSet};
pub use composition::{
    BasketComposition, BasketItem, DefaultPrices, PriceSource, EGGS, FALLBACK_PRICE, MILK, OIL,
    PORK, RICE,
};
