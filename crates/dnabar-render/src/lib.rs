//! Rasterisation of barcode descriptions into PNG files.

pub mod raster;

pub use raster::*;

use std::path::Path;

use dnabar_core::BarcodeImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to render: barcode has no blocks")]
    EmptyImage,
    #[error("Invalid render settings: {0}")]
    InvalidSettings(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Destination that turns a barcode description into a file on disk
pub trait RenderSink {
    fn write(&self, image: &BarcodeImage, path: &Path) -> Result<(), RenderError>;
}
