//! Storage module
//!
//! File-based input and output for the index pipeline.

pub mod json;

pub use json::{
    encode_records, load_listings, load_records, write_bytes, write_records, StoreError,
    StoreResult,
};
