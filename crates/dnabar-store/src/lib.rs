//! Append-only JSON catalog of saved barcodes.

pub mod record;
pub mod store;

pub use record::*;
pub use store::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read record store {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write record store {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Record store {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}
