//! Data models
//!
//! Listings coming in and index records going out.

mod index_record;
mod listing;

pub use index_record::{sort_by_ranking, IndexRecord};
pub use listing::{group_by_city, Listing};
