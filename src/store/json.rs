//! JSON file storage
//!
//! Reads captured listings and reads/writes the published index dataset.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{IndexRecord, Listing};

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of listings
///
/// A record missing a required field rejects the whole file.
pub fn load_listings<P: AsRef<Path>>(path: P) -> StoreResult<Vec<Listing>> {
    let path = path.as_ref();
    let listings: Vec<Listing> = read_json(path)?;
    tracing::info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

/// Load a previously written index dataset
pub fn load_records<P: AsRef<Path>>(path: P) -> StoreResult<Vec<IndexRecord>> {
    read_json(path.as_ref())
}

/// Encode records the way they are written to disk
pub fn encode_records(records: &[IndexRecord]) -> StoreResult<String> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}

/// Write the index dataset as pretty-printed UTF-8 JSON
pub fn write_records<P: AsRef<Path>>(path: P, records: &[IndexRecord]) -> StoreResult<()> {
    let path = path.as_ref();
    let text = encode_records(records)?;
    write_bytes(path, text.as_bytes())?;
    tracing::info!("Saved {} provinces to {}", records.len(), path.display());
    Ok(())
}

/// Write raw bytes, creating the parent directory when missing
pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
    }
    fs::write(path, bytes).map_err(io_error(path))
}
