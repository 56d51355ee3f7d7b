use std::path::PathBuf;

use dnabar_core::ValidationError;
use dnabar_render::RenderError;
use dnabar_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    /// Empty input or a character outside {A, T, G, C}
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write image {path}: {source}")]
    ImageWrite { path: PathBuf, source: RenderError },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Please generate a barcode first")]
    NothingGenerated,
    #[error("{path} is already saved for a different sequence")]
    PathConflict { path: PathBuf },
}
